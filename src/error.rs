//! Error types for stormsim.
//!
//! Errors exist only at configuration time. Once a scene is built, no tick
//! operation fails: missing effect slots are skipped, degenerate numeric
//! inputs degrade to no-ops, and out-of-range intensity is clamped.

use std::fmt;

/// Errors that can occur while validating weather configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An activation threshold was outside [0, 1).
    ///
    /// Thresholds of 1.0 or above would make the power renormalization
    /// `(intensity - t) / (1 - t)` divide by zero or never activate.
    ThresholdOutOfRange { name: &'static str, value: f32 },
    /// A min/max parameter range had min above max where ordering matters.
    InvalidRange { name: &'static str, min: f32, max: f32 },
    /// A radius (movement or attraction) was zero or negative.
    NonPositiveRadius { name: &'static str, value: f32 },
    /// A duration or rate that must be positive was not.
    NonPositiveValue { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ThresholdOutOfRange { name, value } => write!(
                f,
                "Activation threshold '{}' must be in [0, 1), got {}",
                name, value
            ),
            ConfigError::InvalidRange { name, min, max } => {
                write!(f, "Range '{}' has min {} above max {}", name, min, max)
            }
            ConfigError::NonPositiveRadius { name, value } => {
                write!(f, "Radius '{}' must be positive, got {}", name, value)
            }
            ConfigError::NonPositiveValue { name, value } => {
                write!(f, "Value '{}' must be positive, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
