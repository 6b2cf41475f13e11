//! Distance falloff curves for the attraction field.
//!
//! Controls how the tornado's pull scales with a body's normalized distance
//! from the field center. The convention follows the field itself: the input
//! is `1.0` at the center and `0.0` at the edge of the attraction radius,
//! and the output is a force multiplier.
//!
//! Curves are expected to be monotonic: closer to the center should never
//! pull less than farther out. The built-in variants all are; `Custom` is
//! the caller's responsibility.

use std::fmt;
use std::sync::Arc;

/// Falloff curve mapping normalized distance-to-center to a force multiplier.
///
/// # Example
///
/// ```ignore
/// use stormsim::Falloff;
///
/// // Full force everywhere inside the radius
/// let f = Falloff::Constant;
/// assert_eq!(f.evaluate(0.3), 1.0);
///
/// // Linear ramp: no force at the edge, full force at the center
/// let f = Falloff::Linear;
/// assert_eq!(f.evaluate(0.0), 0.0);
/// assert_eq!(f.evaluate(1.0), 1.0);
///
/// // Hand-authored curve
/// let f = Falloff::custom(|t| t * t);
/// ```
#[derive(Clone, Default)]
pub enum Falloff {
    /// Constant multiplier of 1.0 regardless of distance.
    Constant,

    /// Linear ramp: 0.0 at the edge, 1.0 at the center.
    #[default]
    Linear,

    /// Smoothstep ramp: like `Linear` but with zero slope at both ends,
    /// so bodies entering the radius feel the force build up gradually.
    Smooth,

    /// User-supplied curve. Input is clamped to [0, 1] before the call.
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl Falloff {
    /// Wrap a closure as a custom falloff curve.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Falloff::Custom(Arc::new(f))
    }

    /// Evaluate the curve at normalized distance `t` (1 = center, 0 = edge).
    ///
    /// `t` is clamped to [0, 1] first, so callers never have to guard
    /// against bodies sitting exactly on (or fractionally past) the edge.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Falloff::Constant => 1.0,
            Falloff::Linear => t,
            Falloff::Smooth => t * t * (3.0 - 2.0 * t),
            Falloff::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Falloff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Falloff::Constant => write!(f, "Falloff::Constant"),
            Falloff::Linear => write!(f, "Falloff::Linear"),
            Falloff::Smooth => write!(f, "Falloff::Smooth"),
            Falloff::Custom(_) => write!(f, "Falloff::Custom(..)"),
        }
    }
}
