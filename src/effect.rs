//! Named-parameter interface to the rendering backend.
//!
//! The orchestrator does not draw anything itself. Each visual subsystem
//! (rain, lightning, wind, dust) is represented by an [`Effect`] sink that
//! accepts named float and vector parameters plus an active/inactive flag.
//! A real integration implements [`Effect`] on top of its particle backend;
//! [`EffectParams`] is the bundled in-memory implementation used for headless
//! runs and tests.
//!
//! # Example
//!
//! ```ignore
//! use stormsim::{Effect, EffectParams};
//!
//! let mut rain = EffectParams::new();
//! rain.set_active(true);
//! rain.set_float("Rain Drop Rate", 12_000.0);
//!
//! assert_eq!(rain.get_float("Rain Drop Rate"), Some(12_000.0));
//! ```

use glam::Vec3;
use std::collections::HashMap;

/// A parameter sink for one visual effect instance.
///
/// The orchestrator writes into this every simulation tick. Implementations
/// should treat `set_float`/`set_vec3` as cheap slot assignments;
/// `set_active` is only called on activation edges (at most once per
/// transition), so it may do heavier work like enabling a particle system.
pub trait Effect {
    /// Set a named float parameter.
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a named vector parameter.
    fn set_vec3(&mut self, name: &str, value: Vec3);

    /// Enable or disable the whole effect. Called on activation edges only.
    fn set_active(&mut self, active: bool);
}

/// A parameter value held by [`EffectParams`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    F32(f32),
    Vec3(Vec3),
}

/// In-memory effect parameter store.
///
/// Keeps parameters as an ordered list of (name, value) pairs with a name
/// index for lookup, so iteration order matches write order and repeated
/// writes update in place. Starts inactive, matching a freshly spawned
/// effect that the orchestrator has not enabled yet.
#[derive(Clone, Debug, Default)]
pub struct EffectParams {
    values: Vec<(String, ParamValue)>,
    indices: HashMap<String, usize>,
    active: bool,
    activation_edges: u32,
}

impl EffectParams {
    /// Create an empty, inactive parameter store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the effect is currently enabled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How many times `set_active` has been called (edge counter).
    ///
    /// The orchestrator promises edge-triggered activation; tests use this
    /// to verify the enable call fires exactly once per transition.
    pub fn activation_edges(&self) -> u32 {
        self.activation_edges
    }

    /// Get a float parameter by name.
    pub fn get_float(&self, name: &str) -> Option<f32> {
        match self.get(name) {
            Some(ParamValue::F32(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get a vector parameter by name.
    pub fn get_vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name) {
            Some(ParamValue::Vec3(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get a raw parameter value by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.indices.get(name).map(|&idx| &self.values[idx].1)
    }

    /// Number of distinct parameters written so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters have been written yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all parameters in write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    fn set(&mut self, name: &str, value: ParamValue) {
        if let Some(&idx) = self.indices.get(name) {
            self.values[idx].1 = value;
        } else {
            let idx = self.values.len();
            self.values.push((name.to_string(), value));
            self.indices.insert(name.to_string(), idx);
        }
    }
}

impl Effect for EffectParams {
    fn set_float(&mut self, name: &str, value: f32) {
        self.set(name, ParamValue::F32(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.set(name, ParamValue::Vec3(value));
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.activation_edges += 1;
    }
}

impl<E: Effect + ?Sized> Effect for Box<E> {
    fn set_float(&mut self, name: &str, value: f32) {
        (**self).set_float(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        (**self).set_vec3(name, value);
    }

    fn set_active(&mut self, active: bool) {
        (**self).set_active(active);
    }
}

/// Shared-handle forwarding, so a caller can keep a handle to an effect it
/// has already handed to the orchestrator (inspection, live editing).
impl<E: Effect> Effect for std::rc::Rc<std::cell::RefCell<E>> {
    fn set_float(&mut self, name: &str, value: f32) {
        self.borrow_mut().set_float(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.borrow_mut().set_vec3(name, value);
    }

    fn set_active(&mut self, active: bool) {
        self.borrow_mut().set_active(active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut e = EffectParams::new();
        e.set_float("Rain Drop Rate", 100.0);
        e.set_vec3("Spawn Volume Size", Vec3::new(50.0, 20.0, 50.0));

        assert_eq!(e.get_float("Rain Drop Rate"), Some(100.0));
        assert_eq!(
            e.get_vec3("Spawn Volume Size"),
            Some(Vec3::new(50.0, 20.0, 50.0))
        );
        assert_eq!(e.get_float("missing"), None);
        assert_eq!(e.len(), 2);
    }

    #[test]
    fn test_overwrite_updates_in_place() {
        let mut e = EffectParams::new();
        e.set_float("Turbulence Intensity", 1.0);
        e.set_float("Turbulence Intensity", 7.0);

        assert_eq!(e.get_float("Turbulence Intensity"), Some(7.0));
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn test_type_mismatch_returns_none() {
        let mut e = EffectParams::new();
        e.set_vec3("Spawn Volume Size", Vec3::ONE);
        assert_eq!(e.get_float("Spawn Volume Size"), None);
    }

    #[test]
    fn test_activation_edges_counted() {
        let mut e = EffectParams::new();
        assert!(!e.is_active());
        assert_eq!(e.activation_edges(), 0);

        e.set_active(true);
        assert!(e.is_active());
        e.set_active(false);
        assert_eq!(e.activation_edges(), 2);
    }

    #[test]
    fn test_shared_handle_forwards() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let inner = Rc::new(RefCell::new(EffectParams::new()));
        let mut handle: Box<dyn Effect> = Box::new(inner.clone());
        handle.set_float("Rain Drop Rate", 42.0);
        handle.set_active(true);

        assert_eq!(inner.borrow().get_float("Rain Drop Rate"), Some(42.0));
        assert!(inner.borrow().is_active());
    }

    #[test]
    fn test_iteration_in_write_order() {
        let mut e = EffectParams::new();
        e.set_float("a", 1.0);
        e.set_float("b", 2.0);
        e.set_float("a", 3.0); // update, not re-append

        let names: Vec<&str> = e.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
