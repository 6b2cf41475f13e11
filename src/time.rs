//! Frame timing for real-time loops.
//!
//! The simulation itself is driven purely by delta times, so headless runs
//! and tests never touch the wall clock. [`SimClock`] is the bridge for
//! interactive loops: it measures frame deltas, supports pausing and time
//! scaling, and can substitute a fixed delta for deterministic stepping.
//!
//! # Example
//!
//! ```ignore
//! use stormsim::SimClock;
//!
//! let mut clock = SimClock::new();
//! loop {
//!     let dt = clock.update();
//!     scene.update(dt, &mut world);
//! }
//! ```

use std::time::Instant;

/// Wall-clock frame timer with pause, time scale, and fixed-delta override.
#[derive(Debug)]
pub struct SimClock {
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    paused: bool,
    time_scale: f32,
    fixed_delta: Option<f32>,
}

impl SimClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            time_scale: 1.0,
            fixed_delta: None,
        }
    }

    /// Measure the frame delta. Call once per frame; returns the scaled
    /// delta in seconds (0 while paused).
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        self.delta_secs = self.fixed_delta.unwrap_or(raw) * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;
        self.delta_secs
    }

    /// Total simulated seconds (scaled, excluding pauses).
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Last frame's scaled delta in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames measured since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause: subsequent updates return 0 and elapsed time stops.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The paused span is not replayed.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Set the time scale multiplier (clamped to >= 0; 1 = real time).
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Use a fixed delta instead of measured frame time, or `None` to
    /// return to wall-clock deltas. Useful for deterministic replays.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_clock() {
        let clock = SimClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_update_advances() {
        let mut clock = SimClock::new();
        thread::sleep(Duration::from_millis(10));
        let dt = clock.update();
        assert!(dt > 0.0);
        assert!(clock.elapsed() > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut clock = SimClock::new();
        clock.update();
        clock.pause();
        let elapsed = clock.elapsed();

        thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.update(), 0.0);
        assert_eq!(clock.elapsed(), elapsed);
    }

    #[test]
    fn test_fixed_delta_overrides_wall_clock() {
        let mut clock = SimClock::new();
        clock.set_fixed_delta(Some(1.0 / 60.0));
        thread::sleep(Duration::from_millis(20));
        let dt = clock.update();
        assert!((dt - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_time_scale_applies() {
        let mut clock = SimClock::new();
        clock.set_fixed_delta(Some(0.01));
        clock.set_time_scale(2.0);
        assert!((clock.update() - 0.02).abs() < 1e-6);

        clock.set_time_scale(-1.0); // clamps to 0
        assert_eq!(clock.update(), 0.0);
    }
}
