//! Tornado motion: random-waypoint navigation.
//!
//! [`TornadoMotion`] owns the tornado's position and walks it between random
//! destinations around a fixed origin point. The state machine is:
//!
//! | State | Meaning | Next |
//! |-------|---------|------|
//! | `Idle` | disabled, holding position | `Returning` on activation |
//! | `Returning` | fixed-duration eased move back to the origin | `Moving` |
//! | `Moving` | eased travel to a random waypoint | `Waiting` on arrival |
//! | `Waiting` | pause at the destination | `Moving` |
//!
//! Deactivation cancels the in-flight tween and drops back to `Idle` with no
//! partial-completion side effects; reactivation always restarts from
//! `Returning`, never from the interrupted destination, so the tornado
//! re-enters the scene near its canonical origin.
//!
//! Travel speed and attraction force are not owned here: the orchestrator
//! drives them every simulation tick through [`set_drive`](TornadoMotion::set_drive).

use crate::config::TornadoSettings;
use crate::ease::Tween;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Drive speeds below this hold the tornado in place instead of scheduling
/// an effectively endless tween (and instead of dividing by zero).
const MIN_DRIVE_SPEED: f32 = 1e-4;

/// Public view of the navigation state, for inspection and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    Returning,
    Moving,
    Waiting,
}

enum NavState {
    Idle,
    Returning(Tween),
    Moving(Tween),
    Waiting { remaining: f32 },
}

/// Random-waypoint navigation controller for the tornado.
pub struct TornadoMotion {
    movement_radius: f32,
    wait_time: f32,
    return_duration: f32,
    drive_speed: f32,
    drive_force: f32,
    scale: f32,
    position: Vec3,
    origin: Option<Vec3>,
    enabled: bool,
    state: NavState,
    rng: SmallRng,
}

impl TornadoMotion {
    /// Create a disabled controller at `start`, seeded from entropy.
    pub fn new(settings: &TornadoSettings, start: Vec3) -> Self {
        Self::with_seed(settings, start, rand::random())
    }

    /// Create a disabled controller with a fixed RNG seed.
    ///
    /// Deterministic waypoint sequences for tests and replays.
    pub fn with_seed(settings: &TornadoSettings, start: Vec3, seed: u64) -> Self {
        Self {
            movement_radius: settings.movement_radius.max(0.0),
            wait_time: settings.wait_time.max(0.0),
            return_duration: settings.return_duration.max(0.0),
            drive_speed: 0.0,
            drive_force: 0.0,
            scale: settings.min_scale,
            position: start,
            origin: None,
            enabled: false,
            state: NavState::Idle,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Enable the waypoint loop.
    ///
    /// The first activation fixes the origin at the current position; later
    /// activations reuse it. Always starts with a return move to the origin.
    pub fn activate(&mut self) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        let origin = *self.origin.get_or_insert(self.position);
        self.state = NavState::Returning(Tween::new(self.position, origin, self.return_duration));
    }

    /// Disable the waypoint loop, cancelling any in-flight move.
    ///
    /// The position stays wherever the cancelled tween left it.
    pub fn deactivate(&mut self) {
        self.enabled = false;
        self.state = NavState::Idle;
    }

    /// Set travel speed and attraction force for subsequent moves.
    ///
    /// Written once per simulation tick by the orchestrator. Negative
    /// inputs clamp to zero. A speed change does not retime a move already
    /// in flight; it applies from the next waypoint on.
    pub fn set_drive(&mut self, speed: f32, force: f32) {
        self.drive_speed = speed.max(0.0);
        self.drive_force = force.max(0.0);
    }

    /// Set the tornado's visual scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Advance the navigation state machine by `dt` seconds.
    ///
    /// No-op while disabled.
    pub fn update(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        let dt = dt.max(0.0);
        match &mut self.state {
            NavState::Idle => {}
            NavState::Returning(tween) => {
                self.position = tween.advance(dt);
                if tween.is_finished() {
                    self.begin_move();
                }
            }
            NavState::Moving(tween) => {
                self.position = tween.advance(dt);
                if tween.is_finished() {
                    self.state = NavState::Waiting {
                        remaining: self.wait_time,
                    };
                }
            }
            NavState::Waiting { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.begin_move();
                }
            }
        }
    }

    /// Start travel toward a freshly sampled waypoint.
    ///
    /// With a near-zero drive speed the tornado cannot meaningfully travel,
    /// so it holds in place for another wait cycle and re-checks then.
    fn begin_move(&mut self) {
        let origin = match self.origin {
            Some(o) => o,
            None => {
                self.state = NavState::Idle;
                return;
            }
        };
        if self.drive_speed < MIN_DRIVE_SPEED {
            self.state = NavState::Waiting {
                remaining: self.wait_time.max(MIN_DRIVE_SPEED),
            };
            return;
        }
        let destination = self.sample_destination(origin);
        let distance = self.position.distance(destination);
        let duration = distance / self.drive_speed;
        self.state = NavState::Moving(Tween::new(self.position, destination, duration));
    }

    /// Uniform (x, z) offset within the movement square around the origin.
    /// Ground-plane motion only: y stays at the origin's height.
    fn sample_destination(&mut self, origin: Vec3) -> Vec3 {
        if self.movement_radius <= 0.0 {
            return origin;
        }
        let r = self.movement_radius;
        let dx = self.rng.gen_range(-r..r);
        let dz = self.rng.gen_range(-r..r);
        origin + Vec3::new(dx, 0.0, dz)
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current visual scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether the waypoint loop is running.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current navigation phase.
    pub fn phase(&self) -> NavPhase {
        match self.state {
            NavState::Idle => NavPhase::Idle,
            NavState::Returning(_) => NavPhase::Returning,
            NavState::Moving(_) => NavPhase::Moving,
            NavState::Waiting { .. } => NavPhase::Waiting,
        }
    }

    /// Origin point fixed at first activation, if any.
    pub fn origin(&self) -> Option<Vec3> {
        self.origin
    }

    /// Current drive speed.
    pub fn drive_speed(&self) -> f32 {
        self.drive_speed
    }

    /// Attraction force for the physics cadence to consume.
    ///
    /// Returns 0 while disabled so a stale drive written before
    /// deactivation can never leak force into the scene.
    pub fn attraction_force(&self) -> f32 {
        if self.enabled {
            self.drive_force
        } else {
            0.0
        }
    }

    /// Destination of the move in flight, if any.
    pub fn destination(&self) -> Option<Vec3> {
        match &self.state {
            NavState::Returning(t) | NavState::Moving(t) => Some(t.target()),
            _ => None,
        }
    }
}
