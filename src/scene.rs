//! Top-level storm scene: orchestrator, tornado, and attraction wired up.
//!
//! [`StormScene`] is the single owner that runs the two simulation cadences:
//!
//! - the **simulation tick**, once per [`update`](StormScene::update) call:
//!   orchestrator parameter writes and tornado navigation, and
//! - the **physics tick**, at a fixed rate via an accumulator: attraction
//!   force application around the tornado's current position.
//!
//! The coupling between the two is deliberately loose. The orchestrator
//! writes drive values into the tornado controller; the physics cadence
//! reads whatever the most recent simulation tick wrote. One writer, one
//! reader, no locks.
//!
//! # Example
//!
//! ```ignore
//! use stormsim::{BodySet, EffectParams, StormScene, SubsystemId, WeatherConfig};
//! use glam::Vec3;
//!
//! let mut scene = StormScene::new(WeatherConfig::default())?
//!     .with_effect(SubsystemId::Rain, Box::new(EffectParams::new()))
//!     .with_physics_rate(50.0);
//!
//! let mut world = BodySet::new();
//! world.push(Vec3::new(5.0, 0.0, 0.0));
//!
//! scene.set_intensity(0.8);
//! loop {
//!     scene.update(dt, &mut world);
//!     world.integrate(dt);
//! }
//! ```

use crate::attraction::{AttractionField, BodyQuery};
use crate::config::WeatherConfig;
use crate::effect::Effect;
use crate::error::ConfigError;
use crate::falloff::Falloff;
use crate::motion::TornadoMotion;
use crate::orchestrator::{SubsystemId, ToggleId, WeatherOrchestrator};
use glam::Vec3;

const DEFAULT_PHYSICS_HZ: f32 = 50.0;

/// A complete storm simulation.
///
/// Built once from a validated [`WeatherConfig`], then driven by
/// [`update`](StormScene::update) with frame delta times. All runtime input
/// goes through [`set_intensity`](StormScene::set_intensity) and
/// [`set_toggle`](StormScene::set_toggle).
pub struct StormScene {
    orchestrator: WeatherOrchestrator,
    tornado: TornadoMotion,
    attraction: Option<AttractionField>,
    fixed_dt: f32,
    accumulator: f32,
}

impl StormScene {
    /// Build a scene from a configuration, validating it first.
    ///
    /// The tornado starts at the world origin; see
    /// [`with_tornado_start`](StormScene::with_tornado_start). If the
    /// configured attraction radius cannot form a field, the whole
    /// attraction subsystem is logged and disabled for the session rather
    /// than failing the scene. `validate` has already rejected that
    /// configuration, so in practice this path only fires for configs
    /// mutated past validation.
    pub fn new(config: WeatherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let tornado = TornadoMotion::new(&config.tornado, Vec3::ZERO);
        let attraction = match AttractionField::new(config.tornado.attraction_radius, Falloff::default())
        {
            Ok(field) => Some(field),
            Err(e) => {
                log::error!("attraction field disabled for this session: {}", e);
                None
            }
        };
        Ok(Self {
            orchestrator: WeatherOrchestrator::new(&config),
            tornado,
            attraction,
            fixed_dt: 1.0 / DEFAULT_PHYSICS_HZ,
            accumulator: 0.0,
        })
    }

    /// Attach an effect sink to a subsystem slot.
    pub fn with_effect(mut self, id: SubsystemId, effect: Box<dyn Effect>) -> Self {
        self.orchestrator.set_effect(id, effect);
        self
    }

    /// Set the attraction falloff curve (default: linear).
    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        if let Some(field) = self.attraction.take() {
            // Radius already validated; rebuilding with the same radius cannot fail.
            self.attraction = AttractionField::new(field.radius(), falloff).ok();
        }
        self
    }

    /// Set the fixed physics rate in steps per second (default: 50).
    ///
    /// Non-positive rates disable the physics cadence entirely.
    pub fn with_physics_rate(mut self, hz: f32) -> Self {
        if hz > 0.0 {
            self.fixed_dt = 1.0 / hz;
        } else {
            log::warn!("non-positive physics rate {}; attraction disabled", hz);
            self.attraction = None;
        }
        self
    }

    /// Place the tornado (and therefore its future origin) at `position`.
    ///
    /// Only meaningful before the first activation.
    pub fn with_tornado_start(mut self, position: Vec3, config: &WeatherConfig) -> Self {
        self.tornado = TornadoMotion::new(&config.tornado, position);
        self
    }

    /// Seed the tornado's waypoint RNG for deterministic runs.
    pub fn with_motion_seed(mut self, seed: u64, config: &WeatherConfig) -> Self {
        let position = self.tornado.position();
        self.tornado = TornadoMotion::with_seed(&config.tornado, position, seed);
        self
    }

    /// Set storm intensity (clamped to [0, 1]).
    pub fn set_intensity(&mut self, intensity: f32) {
        self.orchestrator.set_intensity(intensity);
    }

    /// Current storm intensity.
    pub fn intensity(&self) -> f32 {
        self.orchestrator.intensity()
    }

    /// Set one of the four master toggles.
    pub fn set_toggle(&mut self, id: ToggleId, enabled: bool) {
        self.orchestrator.set_toggle(id, enabled);
    }

    /// The tornado controller, for inspection.
    pub fn tornado(&self) -> &TornadoMotion {
        &self.tornado
    }

    /// The orchestrator, for inspection.
    pub fn orchestrator(&self) -> &WeatherOrchestrator {
        &self.orchestrator
    }

    /// Advance the whole scene by `dt` seconds.
    ///
    /// Runs one simulation tick, advances tornado navigation, then runs as
    /// many fixed physics steps as the accumulated time covers, applying
    /// the attraction field at the tornado's position for each.
    pub fn update(&mut self, dt: f32, world: &mut dyn BodyQuery) {
        let dt = dt.max(0.0);

        self.orchestrator.tick(Some(&mut self.tornado));
        self.tornado.update(dt);

        if let Some(field) = &mut self.attraction {
            field.set_max_force(self.tornado.attraction_force());
            self.accumulator += dt;
            while self.accumulator >= self.fixed_dt {
                field.step(self.tornado.position(), world);
                self.accumulator -= self.fixed_dt;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attraction::BodySet;
    use crate::effect::EffectParams;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scene() -> StormScene {
        let config = WeatherConfig::default();
        StormScene::new(config.clone())
            .unwrap()
            .with_motion_seed(7, &config)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = WeatherConfig::default();
        config.tornado.activation_threshold = 1.5;
        assert!(StormScene::new(config).is_err());
    }

    #[test]
    fn test_calm_scene_applies_no_force() {
        let mut s = scene();
        let mut world = BodySet::new();
        let idx = world.push(Vec3::new(1.0, 0.0, 0.0)); // right next to the tornado

        s.set_intensity(0.0);
        for _ in 0..100 {
            s.update(0.02, &mut world);
        }
        assert_eq!(world.get(idx).unwrap().accumulated_force(), Vec3::ZERO);
        assert_eq!(world.get(idx).unwrap().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_storm_pulls_nearby_bodies() {
        let mut s = scene();
        let mut world = BodySet::new();
        let idx = world.push(Vec3::new(6.0, 0.0, 0.0));

        s.set_intensity(1.0);
        let start = world.get(idx).unwrap().position.distance(s.tornado().position());
        for _ in 0..200 {
            s.update(0.02, &mut world);
            world.integrate(0.02);
        }
        // The tornado wanders, but a body caught in a full-power field moves.
        let moved = world.get(idx).unwrap().position.distance(Vec3::new(6.0, 0.0, 0.0));
        assert!(moved > 0.0, "body never felt the field (start dist {})", start);
    }

    #[test]
    fn test_physics_steps_follow_fixed_rate() {
        // A 10 Hz physics rate over 1 second of 0.25s frames = 10 steps.
        struct CountingWorld(u32);
        impl BodyQuery for CountingWorld {
            fn for_each_within(
                &mut self,
                _c: Vec3,
                _r: f32,
                _v: &mut dyn FnMut(&mut dyn crate::attraction::RigidBody),
            ) {
                self.0 += 1;
            }
        }

        let config = WeatherConfig::default();
        let mut s = StormScene::new(config.clone())
            .unwrap()
            .with_motion_seed(1, &config)
            .with_physics_rate(10.0);
        s.set_intensity(1.0);

        let mut world = CountingWorld(0);
        for _ in 0..4 {
            s.update(0.25, &mut world);
        }
        assert_eq!(world.0, 10);
    }

    #[test]
    fn test_effects_served_through_scene() {
        let rain = Rc::new(RefCell::new(EffectParams::new()));
        let config = WeatherConfig::default();
        let mut s = StormScene::new(config)
            .unwrap()
            .with_effect(SubsystemId::Rain, Box::new(rain.clone()));

        let mut world = BodySet::new();
        s.set_intensity(0.5);
        s.update(0.016, &mut world);

        assert!(rain.borrow().is_active());
        assert_eq!(rain.borrow().get_float("Rain Drop Rate"), Some(10_000.0));
    }

    #[test]
    fn test_toggle_reaches_orchestrator() {
        let rain = Rc::new(RefCell::new(EffectParams::new()));
        let config = WeatherConfig::default();
        let mut s = StormScene::new(config)
            .unwrap()
            .with_effect(SubsystemId::Rain, Box::new(rain.clone()));

        let mut world = BodySet::new();
        s.set_toggle(ToggleId::Rain, false);
        s.set_intensity(0.9);
        s.update(0.016, &mut world);
        assert!(!rain.borrow().is_active());
    }
}
