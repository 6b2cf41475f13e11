//! Headless demo: ramp a storm from calm to full intensity and print what
//! the orchestrator writes into the effect slots.

use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use stormsim::{BodySet, EffectParams, Falloff, SimClock, StormScene, SubsystemId, WeatherConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WeatherConfig::default();

    // The tornado itself has no parameter sink; it is driven through the
    // motion controller inside the scene.
    let slots: Vec<(SubsystemId, Rc<RefCell<EffectParams>>)> = [
        SubsystemId::Dust,
        SubsystemId::CircularWind,
        SubsystemId::Rain,
        SubsystemId::MidLightning,
        SubsystemId::HighLightning,
        SubsystemId::DirectionalWind,
    ]
    .into_iter()
    .map(|id| (id, Rc::new(RefCell::new(EffectParams::new()))))
    .collect();

    let mut scene = StormScene::new(config.clone())?
        .with_falloff(Falloff::Smooth)
        .with_motion_seed(42, &config);
    for (id, slot) in &slots {
        scene = scene.with_effect(*id, Box::new(slot.clone()));
    }

    let mut world = BodySet::new();
    world.push(Vec3::new(8.0, 0.0, 0.0));
    world.push(Vec3::new(-12.0, 0.0, 6.0));

    // Ramp 0 -> 1 over 20 simulated seconds at a fixed 60 fps.
    let mut clock = SimClock::new();
    clock.set_fixed_delta(Some(1.0 / 60.0));
    let total_frames = 20 * 60;
    for frame in 0..total_frames {
        let dt = clock.update();
        let t = frame as f32 / total_frames as f32;
        scene.set_intensity(t);
        scene.update(dt, &mut world);
        world.integrate(dt);

        if frame % 120 == 0 {
            println!("t = {:5.1}s  intensity = {:.2}", clock.elapsed(), t);
            for (id, slot) in &slots {
                let slot = slot.borrow();
                if !slot.is_active() {
                    continue;
                }
                let params: Vec<String> = slot
                    .iter()
                    .map(|(name, value)| format!("{} = {:?}", name, value))
                    .collect();
                println!("  {:?}: {}", id, params.join(", "));
            }
            println!(
                "  tornado at {:.1?} ({:?})",
                scene.tornado().position(),
                scene.tornado().phase()
            );
        }
    }

    println!("\nfinal body positions:");
    for body in world.iter() {
        println!("  {:.2?}  v = {:.2?}", body.position, body.velocity);
    }

    Ok(())
}
