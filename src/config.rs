//! Weather tuning configuration.
//!
//! [`WeatherConfig`] collects every per-subsystem tuning value: activation
//! thresholds, min/max output ranges, and the tornado's motion and physics
//! parameters. It is set once when the scene is built and never mutated by
//! the simulation; the only runtime inputs are the storm intensity scalar
//! and the four subsystem toggles.
//!
//! Defaults reproduce a moderate outdoor storm setup: tornado forming at
//! intensity 0.2, first lightning at 0.5, a second high-altitude layer at
//! 0.75, rain from near zero, directional wind from 0.1.

use crate::error::ConfigError;
use glam::Vec3;

/// Tornado activation, scaling, motion, and attraction tuning.
#[derive(Clone, Debug)]
pub struct TornadoSettings {
    /// Storm intensity (0-1) at which the tornado begins to form.
    pub activation_threshold: f32,
    /// Visual scale at minimum tornado power.
    pub min_scale: f32,
    /// Visual scale at maximum tornado power.
    pub max_scale: f32,
    /// Movement speed at full power. Speed at power 0 is 1.0.
    pub max_speed: f32,
    /// Physics attraction force at full power. Force at power 0 is 0.
    pub max_force: f32,
    /// Dust cloud spawn rate at full tornado power.
    pub max_dust_rate: f32,
    /// Maximum distance the tornado travels from its origin point.
    pub movement_radius: f32,
    /// Pause at each destination before moving again, in seconds.
    pub wait_time: f32,
    /// Duration of the return-to-origin move on activation, in seconds.
    pub return_duration: f32,
    /// Radius of the attraction field around the tornado center.
    pub attraction_radius: f32,
}

impl Default for TornadoSettings {
    fn default() -> Self {
        Self {
            activation_threshold: 0.2,
            min_scale: 0.5,
            max_scale: 1.5,
            max_speed: 5.0,
            max_force: 50.0,
            max_dust_rate: 250.0,
            movement_radius: 30.0,
            wait_time: 2.0,
            return_duration: 1.5,
            attraction_radius: 20.0,
        }
    }
}

/// Rain tuning. Rain is driven by raw intensity, not a renormalized power.
#[derive(Clone, Debug)]
pub struct RainSettings {
    /// Intensity above which rain is visible. A small epsilon, not zero,
    /// so a fully calm scene never flickers the rain system on.
    pub activation_threshold: f32,
    /// Drop rate at intensity 1.0.
    pub max_drop_rate: f32,
    /// Turbulence at intensity 1.0.
    pub max_turbulence: f32,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            activation_threshold: 0.01,
            max_drop_rate: 20_000.0,
            max_turbulence: 10.0,
        }
    }
}

/// Lightning tuning for the two independent sky layers.
///
/// The two layers deliberately lerp their trail lifetimes in opposite
/// directions: the mid layer shortens its trails as the storm builds while
/// the high layer lengthens them. Both directions are plain configuration
/// here; swap `trail_lifetime_from`/`_to` to flip one.
#[derive(Clone, Debug)]
pub struct LightningSettings {
    /// Intensity at which the mid-sky layer appears.
    pub mid_threshold: f32,
    /// Intensity at which the high-sky layer appears.
    pub high_threshold: f32,
    /// Mid-layer spawn rate at full layer power (rate at power 0 is 0.05).
    pub max_mid_rate: f32,
    /// High-layer spawn rate at full layer power (rate at power 0 is 0.05).
    pub max_high_rate: f32,
    /// Mid-layer trail lifetime at power 0.
    pub mid_trail_lifetime_from: f32,
    /// Mid-layer trail lifetime at power 1.
    pub mid_trail_lifetime_to: f32,
    /// High-layer trail lifetime at power 0.
    pub high_trail_lifetime_from: f32,
    /// High-layer trail lifetime at power 1.
    pub high_trail_lifetime_to: f32,
}

impl Default for LightningSettings {
    fn default() -> Self {
        Self {
            mid_threshold: 0.5,
            high_threshold: 0.75,
            max_mid_rate: 0.7,
            max_high_rate: 0.5,
            // Mid trails shorten as the layer powers up.
            mid_trail_lifetime_from: 0.7,
            mid_trail_lifetime_to: 0.3,
            // High trails lengthen as the layer powers up.
            high_trail_lifetime_from: 0.5,
            high_trail_lifetime_to: 1.0,
        }
    }
}

/// Wind tuning for the circular (tornado-bound) and directional layers.
#[derive(Clone, Debug)]
pub struct WindSettings {
    /// Intensity above which directional wind is visible.
    pub directional_threshold: f32,
    /// Directional spawn rate at intensity 1.0.
    pub max_directional_rate: f32,
    /// Directional turbulence at intensity 1.0.
    pub max_directional_turbulence: f32,
    /// Directional trail lifetime at intensity 1.0 (0.5 at intensity 0).
    pub max_directional_trail_lifetime: f32,
    /// Directional spawn volume at intensity 0.
    pub min_directional_volume: Vec3,
    /// Directional spawn volume at intensity 1.0.
    pub max_directional_volume: Vec3,
    /// Circular loop amplitude at full tornado power (5.0 at power 0).
    pub max_circular_amplitude: f32,
    /// Circular spawn rate at full tornado power.
    pub max_circular_rate: f32,
    /// Circular turbulence at full tornado power.
    pub max_circular_turbulence: f32,
    /// Circular trail lifetime at full tornado power (0.5 at power 0).
    pub max_circular_trail_lifetime: f32,
    /// Circular spawn volume at tornado power 0.
    pub min_circular_volume: Vec3,
    /// Circular spawn volume at tornado power 1.
    pub max_circular_volume: Vec3,
}

impl Default for WindSettings {
    fn default() -> Self {
        Self {
            directional_threshold: 0.1,
            max_directional_rate: 5.0,
            max_directional_turbulence: 100.0,
            max_directional_trail_lifetime: 1.0,
            min_directional_volume: Vec3::new(50.0, 20.0, 50.0),
            max_directional_volume: Vec3::new(100.0, 40.0, 100.0),
            max_circular_amplitude: 30.0,
            max_circular_rate: 5.0,
            max_circular_turbulence: 100.0,
            max_circular_trail_lifetime: 1.0,
            min_circular_volume: Vec3::new(10.0, 5.0, 10.0),
            max_circular_volume: Vec3::new(20.0, 10.0, 20.0),
        }
    }
}

/// Complete weather tuning: one settings block per subsystem.
#[derive(Clone, Debug, Default)]
pub struct WeatherConfig {
    pub tornado: TornadoSettings,
    pub rain: RainSettings,
    pub lightning: LightningSettings,
    pub wind: WindSettings,
}

impl WeatherConfig {
    /// Validate thresholds, ranges, and radii.
    ///
    /// Called by `StormScene::new`; standalone configs can call it directly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("tornado.activation_threshold", self.tornado.activation_threshold)?;
        check_threshold("rain.activation_threshold", self.rain.activation_threshold)?;
        check_threshold("lightning.mid_threshold", self.lightning.mid_threshold)?;
        check_threshold("lightning.high_threshold", self.lightning.high_threshold)?;
        check_threshold("wind.directional_threshold", self.wind.directional_threshold)?;

        if self.lightning.high_threshold < self.lightning.mid_threshold {
            return Err(ConfigError::InvalidRange {
                name: "lightning thresholds (mid..high)",
                min: self.lightning.mid_threshold,
                max: self.lightning.high_threshold,
            });
        }
        if self.tornado.min_scale > self.tornado.max_scale {
            return Err(ConfigError::InvalidRange {
                name: "tornado scale",
                min: self.tornado.min_scale,
                max: self.tornado.max_scale,
            });
        }
        if self.tornado.movement_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                name: "tornado.movement_radius",
                value: self.tornado.movement_radius,
            });
        }
        if self.tornado.attraction_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                name: "tornado.attraction_radius",
                value: self.tornado.attraction_radius,
            });
        }
        if self.tornado.return_duration <= 0.0 {
            return Err(ConfigError::NonPositiveValue {
                name: "tornado.return_duration",
                value: self.tornado.return_duration,
            });
        }
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..1.0).contains(&value) {
        return Err(ConfigError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}
