//! Radial attraction field around the tornado center.
//!
//! Every fixed physics step, [`AttractionField::step`] queries all dynamic
//! bodies within the field radius of a center point and applies a centripetal
//! force scaled by a [`Falloff`] curve. The field holds no per-body state:
//! a body entering and leaving the radius across steps feels force only
//! while inside, with no smoothing at the boundary.
//!
//! The physics engine is a collaborator, not part of this crate. It shows up
//! through two traits: [`RigidBody`] (a mutable position plus a force
//! accumulator for the current step) and [`BodyQuery`] (the "all bodies
//! within radius R of point P" primitive). [`BodySet`] is a small Vec-backed
//! implementation for headless runs and tests.
//!
//! # Example
//!
//! ```ignore
//! use stormsim::{AttractionField, BodySet, Falloff};
//! use glam::Vec3;
//!
//! let mut field = AttractionField::new(20.0, Falloff::Linear)?;
//! let mut world = BodySet::new();
//! world.push(Vec3::new(5.0, 0.0, 0.0));
//!
//! // Each fixed physics step:
//! field.set_max_force(50.0);
//! field.step(tornado_position, &mut world);
//! ```

use crate::ease::clamp01;
use crate::error::ConfigError;
use crate::falloff::Falloff;
use glam::Vec3;

/// A physical body the field can pull on.
///
/// `apply_force` adds into the body's force accumulator for the current
/// step: the field applies continuous force, never an impulse.
pub trait RigidBody {
    /// Current world position.
    fn position(&self) -> Vec3;

    /// Accumulate a force for the current physics step.
    fn apply_force(&mut self, force: Vec3);
}

/// Spatial query primitive owned by the physics engine.
///
/// Implementations call `visit` once for every dynamic body whose position
/// lies within `radius` of `center` at the instant of the query. Bodies
/// without a dynamics-capable representation must not be visited.
pub trait BodyQuery {
    fn for_each_within(
        &mut self,
        center: Vec3,
        radius: f32,
        visit: &mut dyn FnMut(&mut dyn RigidBody),
    );
}

/// Radially symmetric pulling force around a moving center.
///
/// `radius` and the falloff curve are fixed per instance; `max_force` is
/// overwritten every simulation tick from the tornado's current drive.
pub struct AttractionField {
    radius: f32,
    max_force: f32,
    falloff: Falloff,
}

impl AttractionField {
    /// Create a field with the given radius and falloff curve.
    ///
    /// A zero or negative radius is a configuration error: the field would
    /// never match a body, so it is rejected up front rather than silently
    /// doing nothing for the whole session.
    pub fn new(radius: f32, falloff: Falloff) -> Result<Self, ConfigError> {
        if radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                name: "attraction radius",
                value: radius,
            });
        }
        Ok(Self {
            radius,
            max_force: 0.0,
            falloff,
        })
    }

    /// Field radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Current maximum force.
    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Overwrite the maximum force. Written once per simulation tick.
    pub fn set_max_force(&mut self, force: f32) {
        self.max_force = force;
    }

    /// Apply one physics step of attraction around `center`.
    ///
    /// Skips the spatial query entirely while `max_force <= 0`: the
    /// tornado is inactive or still ramping up from zero.
    pub fn step(&self, center: Vec3, world: &mut dyn BodyQuery) {
        if self.max_force <= 0.0 {
            return;
        }
        let radius = self.radius;
        let max_force = self.max_force;
        let falloff = &self.falloff;

        world.for_each_within(center, radius, &mut |body| {
            let offset = center - body.position();
            let distance = offset.length();
            // 1 at the center, 0 at the edge of the radius.
            let normalized = clamp01(1.0 - distance / radius);
            let multiplier = falloff.evaluate(normalized);
            let direction = offset.normalize_or_zero();
            body.apply_force(direction * max_force * multiplier);
        });
    }
}

/// A free body with a position and a per-step force accumulator.
///
/// Reference implementation of [`RigidBody`] for headless scenes. Static
/// bodies (`dynamic == false`) are never visited by the query.
#[derive(Clone, Copy, Debug)]
pub struct PointBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub dynamic: bool,
    force: Vec3,
}

impl PointBody {
    /// Create a dynamic body at rest with unit mass.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mass: 1.0,
            dynamic: true,
            force: Vec3::ZERO,
        }
    }

    /// Create a body the field must ignore.
    pub fn fixed(position: Vec3) -> Self {
        Self {
            dynamic: false,
            ..Self::new(position)
        }
    }

    /// Force accumulated during the current step.
    pub fn accumulated_force(&self) -> Vec3 {
        self.force
    }

    /// Integrate the accumulated force over `dt` and clear the accumulator.
    pub fn integrate(&mut self, dt: f32) {
        if self.dynamic && self.mass > 0.0 {
            self.velocity += self.force / self.mass * dt;
            self.position += self.velocity * dt;
        }
        self.force = Vec3::ZERO;
    }
}

impl RigidBody for PointBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }
}

/// Vec-backed body store with a linear-scan range query.
#[derive(Clone, Debug, Default)]
pub struct BodySet {
    bodies: Vec<PointBody>,
}

impl BodySet {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dynamic body at `position`, returning its index.
    pub fn push(&mut self, position: Vec3) -> usize {
        self.add(PointBody::new(position))
    }

    /// Add an arbitrary body, returning its index.
    pub fn add(&mut self, body: PointBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Borrow a body by index.
    pub fn get(&self, index: usize) -> Option<&PointBody> {
        self.bodies.get(index)
    }

    /// Mutably borrow a body by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut PointBody> {
        self.bodies.get_mut(index)
    }

    /// Number of bodies in the store.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Integrate all dynamic bodies over `dt`, clearing force accumulators.
    pub fn integrate(&mut self, dt: f32) {
        for body in &mut self.bodies {
            body.integrate(dt);
        }
    }

    /// Iterate over all bodies.
    pub fn iter(&self) -> impl Iterator<Item = &PointBody> {
        self.bodies.iter()
    }
}

impl BodyQuery for BodySet {
    fn for_each_within(
        &mut self,
        center: Vec3,
        radius: f32,
        visit: &mut dyn FnMut(&mut dyn RigidBody),
    ) {
        let r2 = radius * radius;
        for body in &mut self.bodies {
            if body.dynamic && body.position.distance_squared(center) <= r2 {
                visit(body);
            }
        }
    }
}
