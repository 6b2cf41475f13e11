//! Interpolation and easing helpers.
//!
//! Small pure-math utilities used throughout the crate: clamped linear
//! interpolation for scalars and vectors, the ease-in/ease-out curve used
//! for tornado travel, and [`Tween`], a one-shot eased move of a position
//! over a fixed duration.
//!
//! # Example
//!
//! ```ignore
//! use stormsim::ease::{lerp, Tween};
//! use glam::Vec3;
//!
//! let mut tween = Tween::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0);
//!
//! // In your update loop:
//! let pos = tween.advance(dt);
//! if tween.is_finished() {
//!     // arrived
//! }
//! ```

use glam::Vec3;
use std::f32::consts::PI;

/// Clamp a value to the unit interval.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b`, with `t` clamped to [0, 1].
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Component-wise linear interpolation between two vectors, `t` clamped to [0, 1].
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.lerp(b, clamp01(t))
}

/// Sinusoidal ease-in/ease-out curve.
///
/// Maps [0, 1] to [0, 1] with zero slope at both ends. This is the curve
/// tornado travel uses: slow departure, cruise, slow arrival.
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    0.5 - 0.5 * (PI * clamp01(t)).cos()
}

/// A one-shot eased move of a position over a fixed duration.
///
/// Created with a start point, an end point, and a duration in seconds.
/// Each call to [`advance`](Tween::advance) moves simulation time forward
/// and returns the eased position. A zero or negative duration completes
/// immediately at the end position.
///
/// The tween carries no wall-clock state; it only consumes the `dt` values
/// it is given, so it is fully deterministic.
#[derive(Clone, Debug)]
pub struct Tween {
    start: Vec3,
    end: Vec3,
    duration: f32,
    elapsed: f32,
}

impl Tween {
    /// Create a tween from `start` to `end` taking `duration` seconds.
    pub fn new(start: Vec3, end: Vec3, duration: f32) -> Self {
        Self {
            start,
            end,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the current eased position.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.sample()
    }

    /// The current eased position without advancing time.
    pub fn sample(&self) -> Vec3 {
        if self.duration <= 0.0 {
            return self.end;
        }
        let t = ease_in_out_sine(self.elapsed / self.duration);
        self.start.lerp(self.end, t)
    }

    /// Whether the tween has reached its end position.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The end position this tween is moving toward.
    pub fn target(&self) -> Vec3 {
        self.end
    }
}
