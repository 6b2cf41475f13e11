//! Storm intensity to subsystem parameter mapping.
//!
//! One scalar drives everything: the orchestrator fans `intensity` (0 = calm,
//! 1 = full storm) out into activation state and continuous parameters for
//! every weather subsystem, once per simulation tick.
//!
//! Subsystem behavior is data, not code. Each subsystem is a
//! [`SubsystemSpec`]: an optional master toggle, an optional activation
//! threshold, a power source, and a list of named parameter curves. A single
//! evaluate-and-apply routine processes the whole table, so adding a
//! subsystem or retuning a curve never touches the tick logic.
//!
//! # Power
//!
//! Threshold-gated subsystems renormalize the intensity range above their
//! threshold into a local `power` in [0, 1]:
//!
//! ```text
//! power = clamp01((intensity - threshold) / (1 - threshold))
//! ```
//!
//! so a subsystem gated at 0.5 reaches full power exactly at intensity 1.0.
//! Ungated subsystems (rain, directional wind) use raw intensity as power.
//!
//! # Activation edges
//!
//! `Effect::set_active` fires exactly once per activation-state change,
//! never repeatedly while a subsystem stays active. This is the only
//! discrete transition the orchestrator produces; every parameter curve is
//! continuous above the activation edge.
//!
//! # Example
//!
//! ```ignore
//! use stormsim::{EffectParams, SubsystemId, WeatherConfig, WeatherOrchestrator};
//!
//! let mut orch = WeatherOrchestrator::new(&WeatherConfig::default());
//! orch.set_effect(SubsystemId::Rain, Box::new(EffectParams::new()));
//!
//! orch.set_intensity(0.6);
//! orch.tick(Some(&mut tornado));
//! ```

use crate::config::WeatherConfig;
use crate::ease::{clamp01, lerp, lerp_vec3};
use crate::effect::Effect;
use crate::motion::TornadoMotion;
use glam::Vec3;

/// Renormalize the intensity range above `threshold` into [0, 1].
///
/// Monotone non-decreasing in `intensity`; 0 at the threshold, 1 at
/// intensity 1. A threshold at or above 1 never yields positive power.
pub fn power_above(intensity: f32, threshold: f32) -> f32 {
    if threshold >= 1.0 {
        return 0.0;
    }
    clamp01((intensity - threshold) / (1.0 - threshold))
}

/// The weather subsystems the orchestrator drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubsystemId {
    /// The tornado object itself (scale, drive speed, attraction force).
    Tornado,
    /// Dust cloud at the tornado's base.
    Dust,
    /// Circular wind wrapping the tornado.
    CircularWind,
    /// Rain layer.
    Rain,
    /// Mid-sky lightning layer.
    MidLightning,
    /// High-sky lightning layer.
    HighLightning,
    /// Scene-wide directional wind.
    DirectionalWind,
}

/// The four externally settable master toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleId {
    Tornado,
    Rain,
    Lightning,
    Wind,
}

/// Where a subsystem's power comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PowerSource {
    /// Power is raw storm intensity.
    Raw,
    /// Power is intensity renormalized above the given threshold.
    Above(f32),
}

impl PowerSource {
    fn eval(&self, intensity: f32) -> f32 {
        match *self {
            PowerSource::Raw => intensity,
            PowerSource::Above(threshold) => power_above(intensity, threshold),
        }
    }
}

/// How a named parameter derives from power.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamCurve {
    /// `lerp(from, to, power)`. `from` above `to` is valid and means the
    /// parameter decreases as power rises.
    Lerp { from: f32, to: f32 },
    /// `power * max`.
    Scale { max: f32 },
    /// Component-wise `lerp(from, to, power)` for vector parameters.
    LerpVec3 { from: Vec3, to: Vec3 },
}

/// One named output parameter of a subsystem.
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub curve: ParamCurve,
}

/// Declarative description of one subsystem.
#[derive(Clone, Debug)]
pub struct SubsystemSpec {
    pub id: SubsystemId,
    /// Master toggle gating this subsystem, if any.
    pub toggle: Option<ToggleId>,
    /// Activation threshold (strict `>`). `None` means the subsystem is
    /// evaluated whenever its effect slot exists and has no on/off edge of
    /// its own (circular wind: its parameters just sit at power-0 values
    /// while the tornado is below threshold).
    pub gate: Option<f32>,
    pub power: PowerSource,
    pub params: Vec<ParamSpec>,
}

/// Master toggle state. All enabled by default.
#[derive(Clone, Copy, Debug)]
pub struct Toggles {
    pub tornado: bool,
    pub rain: bool,
    pub lightning: bool,
    pub wind: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            tornado: true,
            rain: true,
            lightning: true,
            wind: true,
        }
    }
}

impl Toggles {
    fn get(&self, id: ToggleId) -> bool {
        match id {
            ToggleId::Tornado => self.tornado,
            ToggleId::Rain => self.rain,
            ToggleId::Lightning => self.lightning,
            ToggleId::Wind => self.wind,
        }
    }

    fn set(&mut self, id: ToggleId, value: bool) {
        match id {
            ToggleId::Tornado => self.tornado = value,
            ToggleId::Rain => self.rain = value,
            ToggleId::Lightning => self.lightning = value,
            ToggleId::Wind => self.wind = value,
        }
    }
}

struct Entry {
    spec: SubsystemSpec,
    effect: Option<Box<dyn Effect>>,
    prev_active: bool,
}

/// Build the subsystem table from a weather configuration.
///
/// Exposed for inspection and benchmarks; [`WeatherOrchestrator::new`] calls
/// this internally.
pub fn subsystem_specs(config: &WeatherConfig) -> Vec<SubsystemSpec> {
    let t = &config.tornado;
    let r = &config.rain;
    let l = &config.lightning;
    let w = &config.wind;

    vec![
        SubsystemSpec {
            id: SubsystemId::Dust,
            toggle: Some(ToggleId::Tornado),
            gate: Some(t.activation_threshold),
            power: PowerSource::Above(t.activation_threshold),
            params: vec![ParamSpec {
                name: "Dust Spawn Rate",
                curve: ParamCurve::Scale {
                    max: t.max_dust_rate,
                },
            }],
        },
        SubsystemSpec {
            id: SubsystemId::CircularWind,
            toggle: None,
            gate: None,
            power: PowerSource::Above(t.activation_threshold),
            params: vec![
                ParamSpec {
                    name: "Loop Amplitude",
                    curve: ParamCurve::Lerp {
                        from: 5.0,
                        to: w.max_circular_amplitude,
                    },
                },
                ParamSpec {
                    name: "Wind Spawn Rate",
                    curve: ParamCurve::Scale {
                        max: w.max_circular_rate,
                    },
                },
                ParamSpec {
                    name: "Turbulence Intensity",
                    curve: ParamCurve::Scale {
                        max: w.max_circular_turbulence,
                    },
                },
                ParamSpec {
                    name: "Trail Lifetime",
                    curve: ParamCurve::Lerp {
                        from: 0.5,
                        to: w.max_circular_trail_lifetime,
                    },
                },
                ParamSpec {
                    name: "Spawn Volume Size",
                    curve: ParamCurve::LerpVec3 {
                        from: w.min_circular_volume,
                        to: w.max_circular_volume,
                    },
                },
            ],
        },
        SubsystemSpec {
            id: SubsystemId::Rain,
            toggle: Some(ToggleId::Rain),
            gate: Some(r.activation_threshold),
            power: PowerSource::Raw,
            params: vec![
                ParamSpec {
                    name: "Rain Drop Rate",
                    curve: ParamCurve::Scale {
                        max: r.max_drop_rate,
                    },
                },
                ParamSpec {
                    name: "Turbulence Intensity",
                    curve: ParamCurve::Scale {
                        max: r.max_turbulence,
                    },
                },
            ],
        },
        SubsystemSpec {
            id: SubsystemId::MidLightning,
            toggle: Some(ToggleId::Lightning),
            gate: Some(l.mid_threshold),
            power: PowerSource::Above(l.mid_threshold),
            params: vec![
                ParamSpec {
                    name: "Lightning Spawn Rate",
                    curve: ParamCurve::Lerp {
                        from: 0.05,
                        to: l.max_mid_rate,
                    },
                },
                ParamSpec {
                    name: "Trail Lifetime",
                    curve: ParamCurve::Lerp {
                        from: l.mid_trail_lifetime_from,
                        to: l.mid_trail_lifetime_to,
                    },
                },
            ],
        },
        SubsystemSpec {
            id: SubsystemId::HighLightning,
            toggle: Some(ToggleId::Lightning),
            gate: Some(l.high_threshold),
            power: PowerSource::Above(l.high_threshold),
            params: vec![
                ParamSpec {
                    name: "Lightning Spawn Rate",
                    curve: ParamCurve::Lerp {
                        from: 0.05,
                        to: l.max_high_rate,
                    },
                },
                ParamSpec {
                    name: "Trail Lifetime",
                    curve: ParamCurve::Lerp {
                        from: l.high_trail_lifetime_from,
                        to: l.high_trail_lifetime_to,
                    },
                },
            ],
        },
        SubsystemSpec {
            id: SubsystemId::DirectionalWind,
            toggle: Some(ToggleId::Wind),
            gate: Some(w.directional_threshold),
            power: PowerSource::Raw,
            params: vec![
                ParamSpec {
                    name: "Wind Spawn Rate",
                    curve: ParamCurve::Scale {
                        max: w.max_directional_rate,
                    },
                },
                ParamSpec {
                    name: "Turbulence Intensity",
                    curve: ParamCurve::Scale {
                        max: w.max_directional_turbulence,
                    },
                },
                ParamSpec {
                    name: "Trail Lifetime",
                    curve: ParamCurve::Lerp {
                        from: 0.5,
                        to: w.max_directional_trail_lifetime,
                    },
                },
                ParamSpec {
                    name: "Spawn Volume Size",
                    curve: ParamCurve::LerpVec3 {
                        from: w.min_directional_volume,
                        to: w.max_directional_volume,
                    },
                },
            ],
        },
    ]
}

/// Maps storm intensity to per-subsystem activation and parameters.
///
/// Holds one optional [`Effect`] slot per subsystem. A subsystem without a
/// slot is skipped each tick; a missing collaborator is never an error.
/// The tornado object is special-cased: its outputs go to
/// [`TornadoMotion`] through its narrow drive interface rather than a
/// named-parameter sink.
pub struct WeatherOrchestrator {
    intensity: f32,
    toggles: Toggles,
    tornado_threshold: f32,
    tornado_scale: (f32, f32),
    tornado_max_speed: f32,
    tornado_max_force: f32,
    entries: Vec<Entry>,
}

impl WeatherOrchestrator {
    /// Build an orchestrator from a configuration. No effect slots attached.
    pub fn new(config: &WeatherConfig) -> Self {
        let entries = subsystem_specs(config)
            .into_iter()
            .map(|spec| Entry {
                spec,
                effect: None,
                prev_active: false,
            })
            .collect();
        Self {
            intensity: 0.0,
            toggles: Toggles::default(),
            tornado_threshold: config.tornado.activation_threshold,
            tornado_scale: (config.tornado.min_scale, config.tornado.max_scale),
            tornado_max_speed: config.tornado.max_speed,
            tornado_max_force: config.tornado.max_force,
            entries,
        }
    }

    /// Attach an effect sink to a subsystem slot, replacing any previous one.
    ///
    /// `SubsystemId::Tornado` has no parameter slot because the tornado is
    /// driven through [`TornadoMotion`], not a named-parameter sink.
    /// Attaching to it drops the effect and logs a warning.
    pub fn set_effect(&mut self, id: SubsystemId, effect: Box<dyn Effect>) {
        match self.entries.iter_mut().find(|e| e.spec.id == id) {
            Some(entry) => entry.effect = Some(effect),
            None => log::warn!("{:?} has no parameter slot; effect dropped", id),
        }
    }

    /// Set storm intensity. Clamped to [0, 1] before storage, so an
    /// out-of-range scalar from the external controller never propagates.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = clamp01(intensity);
    }

    /// Current (clamped) storm intensity.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Set one of the four master toggles.
    pub fn set_toggle(&mut self, id: ToggleId, enabled: bool) {
        self.toggles.set(id, enabled);
    }

    /// Read one of the four master toggles.
    pub fn toggle(&self, id: ToggleId) -> bool {
        self.toggles.get(id)
    }

    /// Power of the tornado subsystem at the current intensity.
    pub fn tornado_power(&self) -> f32 {
        power_above(self.intensity, self.tornado_threshold)
    }

    /// Run one simulation tick.
    ///
    /// Computes activation and parameters for every subsystem with an
    /// attached effect, and drives the tornado controller if one is given.
    /// Idempotent for a fixed intensity: repeated calls write the same
    /// parameter values and produce no further activation edges.
    pub fn tick(&mut self, tornado: Option<&mut TornadoMotion>) {
        let intensity = self.intensity;

        if let Some(tornado) = tornado {
            self.drive_tornado(tornado, intensity);
        }

        for entry in &mut self.entries {
            let Some(effect) = entry.effect.as_deref_mut() else {
                continue;
            };
            let toggled = entry.spec.toggle.map_or(true, |t| self.toggles.get(t));

            if let Some(threshold) = entry.spec.gate {
                let active = toggled && intensity > threshold;
                if active != entry.prev_active {
                    effect.set_active(active);
                    entry.prev_active = active;
                }
                if !active {
                    continue;
                }
            }

            let power = entry.spec.power.eval(intensity);
            for param in &entry.spec.params {
                match param.curve {
                    ParamCurve::Lerp { from, to } => {
                        effect.set_float(param.name, lerp(from, to, power));
                    }
                    ParamCurve::Scale { max } => {
                        effect.set_float(param.name, power * max);
                    }
                    ParamCurve::LerpVec3 { from, to } => {
                        effect.set_vec3(param.name, lerp_vec3(from, to, power));
                    }
                }
            }
        }
    }

    /// Activation and drive for the tornado controller.
    ///
    /// Activation is edge-triggered against the controller's own enabled
    /// state; drive values are rewritten every tick while active.
    fn drive_tornado(&self, tornado: &mut TornadoMotion, intensity: f32) {
        let active = self.toggles.tornado && intensity > self.tornado_threshold;
        if active != tornado.is_enabled() {
            if active {
                tornado.activate();
            } else {
                tornado.deactivate();
            }
        }
        if !active {
            return;
        }
        let power = power_above(intensity, self.tornado_threshold);
        let (min_scale, max_scale) = self.tornado_scale;
        tornado.set_scale(lerp(min_scale, max_scale, power));
        tornado.set_drive(
            lerp(1.0, self.tornado_max_speed, power),
            lerp(0.0, self.tornado_max_force, power),
        );
    }
}
