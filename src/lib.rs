//! # StormSim - Procedural Storm Simulation
//!
//! Intensity-driven weather orchestration for interactive 3D scenes.
//!
//! One scalar, storm intensity from 0 (calm) to 1 (full storm), fans out into
//! activation state and continuous parameters for every weather subsystem:
//! tornado, dust, rain, two lightning layers, and two wind layers. A second
//! controller walks the tornado between random waypoints and pulls nearby
//! physical bodies toward it with a distance-falloff force.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stormsim::prelude::*;
//! use glam::Vec3;
//!
//! let mut scene = StormScene::new(WeatherConfig::default())?
//!     .with_effect(SubsystemId::Rain, Box::new(EffectParams::new()))
//!     .with_effect(SubsystemId::MidLightning, Box::new(EffectParams::new()))
//!     .with_falloff(Falloff::Smooth);
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
//!
//! ## Core Concepts
//!
//! ### Intensity and power
//!
//! Subsystems activate when intensity rises strictly above their threshold,
//! and renormalize the remaining range into a local `power` in [0, 1]:
//! `power = clamp01((intensity - threshold) / (1 - threshold))`. Rain and
//! directional wind use raw intensity directly.
//!
//! | Subsystem | Threshold (default) | Power |
//! |-----------|---------------------|-------|
//! | Tornado + dust | 0.2 | renormalized |
//! | Circular wind | none (always evaluated) | tornado's power |
//! | Rain | 0.01 | raw intensity |
//! | Mid lightning | 0.5 | renormalized |
//! | High lightning | 0.75 | renormalized |
//! | Directional wind | 0.1 | raw intensity |
//!
//! ### Effects
//!
//! The crate draws nothing. Each subsystem writes named float/vector
//! parameters and an active flag into an [`Effect`] sink; implement the
//! trait on your particle backend, or use [`EffectParams`] headlessly.
//!
//! ### Physics
//!
//! The physics engine is likewise external, seen through [`RigidBody`] and
//! [`BodyQuery`]. [`AttractionField`] applies a centripetal force each
//! fixed physics step to every dynamic body inside its radius, scaled by a
//! [`Falloff`] curve (1 = at center, 0 = at edge). [`BodySet`] is a small
//! built-in body store for headless runs.
//!
//! ### Determinism
//!
//! Everything is driven by explicit delta times; the only wall-clock code
//! is [`SimClock`] for real loops. Seed the tornado's waypoint RNG for
//! reproducible runs.

pub mod attraction;
pub mod config;
pub mod ease;
pub mod effect;
pub mod error;
pub mod falloff;
pub mod motion;
pub mod orchestrator;
pub mod scene;
pub mod time;

pub use attraction::{AttractionField, BodyQuery, BodySet, PointBody, RigidBody};
pub use config::{LightningSettings, RainSettings, TornadoSettings, WeatherConfig, WindSettings};
pub use ease::Tween;
pub use effect::{Effect, EffectParams, ParamValue};
pub use error::ConfigError;
pub use falloff::Falloff;
pub use glam::{Vec2, Vec3, Vec4};
pub use motion::{NavPhase, TornadoMotion};
pub use orchestrator::{
    power_above, ParamCurve, ParamSpec, PowerSource, SubsystemId, SubsystemSpec, ToggleId,
    Toggles, WeatherOrchestrator,
};
pub use scene::StormScene;
pub use time::SimClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use stormsim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attraction::{AttractionField, BodyQuery, BodySet, PointBody, RigidBody};
    pub use crate::config::WeatherConfig;
    pub use crate::effect::{Effect, EffectParams};
    pub use crate::falloff::Falloff;
    pub use crate::motion::{NavPhase, TornadoMotion};
    pub use crate::orchestrator::{SubsystemId, ToggleId, WeatherOrchestrator};
    pub use crate::scene::StormScene;
    pub use crate::time::SimClock;
    pub use crate::{Vec2, Vec3, Vec4};
}
