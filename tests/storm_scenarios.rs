//! End-to-end storm scenarios.
//!
//! These tests drive a full [`StormScene`] through intensity schedules and
//! verify what reaches the effect sinks, the tornado controller, and the
//! physics world, using only the public API.

use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use stormsim::{
    BodySet, EffectParams, Falloff, NavPhase, StormScene, SubsystemId, ToggleId, WeatherConfig,
};

type Shared = Rc<RefCell<EffectParams>>;

const ALL_SLOTS: [SubsystemId; 6] = [
    SubsystemId::Dust,
    SubsystemId::CircularWind,
    SubsystemId::Rain,
    SubsystemId::MidLightning,
    SubsystemId::HighLightning,
    SubsystemId::DirectionalWind,
];

fn wired_scene(seed: u64) -> (StormScene, Vec<(SubsystemId, Shared)>) {
    let config = WeatherConfig::default();
    let slots: Vec<(SubsystemId, Shared)> = ALL_SLOTS
        .into_iter()
        .map(|id| (id, Rc::new(RefCell::new(EffectParams::new()))))
        .collect();

    let mut scene = StormScene::new(config.clone())
        .unwrap()
        .with_motion_seed(seed, &config);
    for (id, slot) in &slots {
        scene = scene.with_effect(*id, Box::new(slot.clone()));
    }
    (scene, slots)
}

fn slot(slots: &[(SubsystemId, Shared)], id: SubsystemId) -> Shared {
    slots
        .iter()
        .find(|(s, _)| *s == id)
        .map(|(_, e)| e.clone())
        .unwrap()
}

// ============================================================================
// Intensity Scenarios
// ============================================================================

#[test]
fn test_calm_scene_stays_silent() {
    let (mut scene, slots) = wired_scene(1);
    let mut world = BodySet::new();

    scene.set_intensity(0.0);
    for _ in 0..60 {
        scene.update(1.0 / 60.0, &mut world);
    }

    for (_, e) in &slots {
        assert!(!e.borrow().is_active());
        assert_eq!(e.borrow().activation_edges(), 0);
    }
    assert!(!scene.tornado().is_enabled());
    assert_eq!(scene.tornado().phase(), NavPhase::Idle);
}

#[test]
fn test_moderate_storm_parameter_snapshot() {
    let (mut scene, slots) = wired_scene(2);
    let mut world = BodySet::new();

    scene.set_intensity(0.6);
    scene.update(1.0 / 60.0, &mut world);

    // Tornado power at 0.6 intensity: (0.6 - 0.2) / 0.8 = 0.5.
    let t = scene.tornado();
    assert!(t.is_enabled());
    assert!((t.scale() - 1.0).abs() < 1e-5);
    assert!((t.drive_speed() - 3.0).abs() < 1e-5);
    assert!((t.attraction_force() - 25.0).abs() < 1e-5);

    let dust = slot(&slots, SubsystemId::Dust);
    assert!((dust.borrow().get_float("Dust Spawn Rate").unwrap() - 125.0).abs() < 1e-3);

    let rain = slot(&slots, SubsystemId::Rain);
    assert!((rain.borrow().get_float("Rain Drop Rate").unwrap() - 12_000.0).abs() < 1e-1);
    assert!((rain.borrow().get_float("Turbulence Intensity").unwrap() - 6.0).abs() < 1e-5);

    // Mid lightning power: (0.6 - 0.5) / 0.5 = 0.2; trail shortens with power.
    let mid = slot(&slots, SubsystemId::MidLightning);
    assert!(mid.borrow().is_active());
    assert!((mid.borrow().get_float("Trail Lifetime").unwrap() - 0.62).abs() < 1e-5);

    let high = slot(&slots, SubsystemId::HighLightning);
    assert!(!high.borrow().is_active());
    assert!(high.borrow().is_empty());

    // Circular wind shares the tornado's power without an edge of its own.
    let circular = slot(&slots, SubsystemId::CircularWind);
    assert_eq!(circular.borrow().activation_edges(), 0);
    assert!((circular.borrow().get_float("Loop Amplitude").unwrap() - 17.5).abs() < 1e-4);
}

#[test]
fn test_full_storm_everything_at_maximum() {
    let (mut scene, slots) = wired_scene(3);
    let mut world = BodySet::new();

    scene.set_intensity(1.0);
    scene.update(1.0 / 60.0, &mut world);

    for (_, e) in &slots {
        assert!(e.borrow().activation_edges() <= 1);
    }

    assert_eq!(
        slot(&slots, SubsystemId::Dust).borrow().get_float("Dust Spawn Rate"),
        Some(250.0)
    );
    assert_eq!(
        slot(&slots, SubsystemId::Rain).borrow().get_float("Rain Drop Rate"),
        Some(20_000.0)
    );
    assert_eq!(
        slot(&slots, SubsystemId::MidLightning)
            .borrow()
            .get_float("Lightning Spawn Rate"),
        Some(0.7)
    );
    assert_eq!(
        slot(&slots, SubsystemId::HighLightning)
            .borrow()
            .get_float("Trail Lifetime"),
        Some(1.0)
    );
    assert_eq!(
        slot(&slots, SubsystemId::DirectionalWind)
            .borrow()
            .get_vec3("Spawn Volume Size"),
        Some(Vec3::new(100.0, 40.0, 100.0))
    );
    assert!((scene.tornado().attraction_force() - 50.0).abs() < 1e-5);
}

#[test]
fn test_ramp_up_then_down_returns_to_calm() {
    let (mut scene, slots) = wired_scene(4);
    let mut world = BodySet::new();
    let dt = 1.0 / 60.0;

    // Up to full storm and back down over 20 simulated seconds.
    for frame in 0..600 {
        scene.set_intensity(frame as f32 / 600.0);
        scene.update(dt, &mut world);
    }
    for frame in (0..600).rev() {
        scene.set_intensity(frame as f32 / 600.0);
        scene.update(dt, &mut world);
    }

    for (_, e) in &slots {
        assert!(!e.borrow().is_active());
    }
    assert!(!scene.tornado().is_enabled());
    assert_eq!(scene.tornado().attraction_force(), 0.0);

    // Each gated subsystem crossed its threshold twice: one on-edge, one off.
    let rain = slot(&slots, SubsystemId::Rain);
    assert_eq!(rain.borrow().activation_edges(), 2);
    let mid = slot(&slots, SubsystemId::MidLightning);
    assert_eq!(mid.borrow().activation_edges(), 2);
}

// ============================================================================
// Tornado Motion Through the Scene
// ============================================================================

#[test]
fn test_tornado_wanders_during_storm() {
    let (mut scene, _) = wired_scene(5);
    let mut world = BodySet::new();
    let start = scene.tornado().position();

    scene.set_intensity(1.0);
    let mut max_dist: f32 = 0.0;
    for _ in 0..6000 {
        scene.update(1.0 / 60.0, &mut world);
        max_dist = max_dist.max(scene.tornado().position().distance(start));
    }
    assert!(max_dist > 1.0, "tornado never left its origin");

    let radius = WeatherConfig::default().tornado.movement_radius;
    // Square sampling: worst case is the corner, sqrt(2) * radius.
    assert!(max_dist <= radius * std::f32::consts::SQRT_2 + 1e-3);
}

#[test]
fn test_tornado_freezes_when_storm_collapses() {
    let (mut scene, _) = wired_scene(6);
    let mut world = BodySet::new();

    scene.set_intensity(1.0);
    for _ in 0..600 {
        scene.update(1.0 / 60.0, &mut world);
    }

    scene.set_intensity(0.0);
    scene.update(1.0 / 60.0, &mut world);
    let frozen = scene.tornado().position();
    for _ in 0..120 {
        scene.update(1.0 / 60.0, &mut world);
    }
    assert_eq!(scene.tornado().position(), frozen);
    assert_eq!(scene.tornado().phase(), NavPhase::Idle);
}

#[test]
fn test_seeded_scenes_replay_identically() {
    let run = || {
        let (mut scene, _) = wired_scene(7);
        let mut world = BodySet::new();
        scene.set_intensity(0.9);
        for _ in 0..3000 {
            scene.update(1.0 / 60.0, &mut world);
        }
        scene.tornado().position()
    };
    assert_eq!(run(), run());
}

// ============================================================================
// Attraction Through the Scene
// ============================================================================

#[test]
fn test_bodies_accelerate_toward_tornado() {
    let config = WeatherConfig::default();
    let mut scene = StormScene::new(config.clone())
        .unwrap()
        .with_motion_seed(8, &config)
        .with_falloff(Falloff::Smooth);

    let mut world = BodySet::new();
    let near = world.push(Vec3::new(5.0, 0.0, 0.0));
    let far = world.push(Vec3::new(500.0, 0.0, 0.0));

    scene.set_intensity(1.0);
    let dt = 1.0 / 60.0;
    for _ in 0..120 {
        scene.update(dt, &mut world);
        world.integrate(dt);
    }

    let near_body = world.get(near).unwrap();
    assert!(near_body.velocity.length() > 0.0);

    // Well outside the attraction radius: untouched.
    let far_body = world.get(far).unwrap();
    assert_eq!(far_body.position, Vec3::new(500.0, 0.0, 0.0));
    assert_eq!(far_body.velocity, Vec3::ZERO);
}

#[test]
fn test_static_bodies_ignore_the_field() {
    let (mut scene, _) = wired_scene(9);
    let mut world = BodySet::new();
    let anchor = world.add(stormsim::PointBody::fixed(Vec3::new(3.0, 0.0, 0.0)));

    scene.set_intensity(1.0);
    let dt = 1.0 / 60.0;
    for _ in 0..120 {
        scene.update(dt, &mut world);
        world.integrate(dt);
    }
    assert_eq!(world.get(anchor).unwrap().position, Vec3::new(3.0, 0.0, 0.0));
}

// ============================================================================
// Toggles
// ============================================================================

#[test]
fn test_master_toggles_gate_their_subsystems() {
    let (mut scene, slots) = wired_scene(10);
    let mut world = BodySet::new();

    scene.set_toggle(ToggleId::Tornado, false);
    scene.set_toggle(ToggleId::Lightning, false);
    scene.set_intensity(1.0);
    scene.update(1.0 / 60.0, &mut world);

    assert!(!scene.tornado().is_enabled());
    assert!(!slot(&slots, SubsystemId::Dust).borrow().is_active());
    assert!(!slot(&slots, SubsystemId::MidLightning).borrow().is_active());
    assert!(!slot(&slots, SubsystemId::HighLightning).borrow().is_active());
    // Rain and wind are still governed only by intensity.
    assert!(slot(&slots, SubsystemId::Rain).borrow().is_active());
    assert!(slot(&slots, SubsystemId::DirectionalWind).borrow().is_active());

    // Flipping a toggle mid-storm produces exactly one new edge.
    scene.set_toggle(ToggleId::Lightning, true);
    scene.update(1.0 / 60.0, &mut world);
    assert_eq!(
        slot(&slots, SubsystemId::MidLightning)
            .borrow()
            .activation_edges(),
        1
    );
}
