use std::collections::HashSet;

use crate::control::{Axis, Directives, Key, KeyBindings};

/// Directives driven by key edges, plus the movement keys currently held
///
/// Pressing a key only claims its axis when the axis is idle; releasing a key
/// only stops the axis if that key's direction is the one driving it. While
/// suppressed (automatic delivery running) every edge is dropped.
#[derive(Debug, Clone, Default)]
pub struct ManualControlState {
    directives: Directives,
    held: HashSet<Key>,
    suppressed: bool,
}

impl ManualControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Returns true when the edge was accepted
    pub fn key_down(&mut self, bindings: &KeyBindings, key: Key) -> bool {
        if self.suppressed {
            return false;
        }
        let Some(binding) = bindings.lookup(key) else {
            return false;
        };

        self.held.insert(key);
        if self.directives.get(binding.axis) == 0 {
            self.directives.set(binding.axis, binding.sign);
        }
        true
    }

    /// Returns true when the edge was accepted
    pub fn key_up(&mut self, bindings: &KeyBindings, key: Key) -> bool {
        if self.suppressed {
            return false;
        }
        let Some(binding) = bindings.lookup(key) else {
            return false;
        };

        self.held.remove(&key);
        if self.directives.get(binding.axis) == binding.sign {
            self.directives.set(binding.axis, 0);
        }
        true
    }

    /// Drop all directives and held keys
    pub fn clear(&mut self) {
        self.directives.clear();
        self.held.clear();
    }

    /// Hand the rig to automatic control
    pub fn suppress(&mut self) {
        self.clear();
        self.suppressed = true;
    }

    /// Give control back to the user with everything at rest
    pub fn restore(&mut self) {
        self.clear();
        self.suppressed = false;
    }

    pub fn axis(&self, axis: Axis) -> i8 {
        self.directives.get(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> (ManualControlState, KeyBindings) {
        (ManualControlState::new(), KeyBindings::default())
    }

    #[test]
    fn test_press_and_release() {
        let (mut controls, bindings) = state();

        assert!(controls.key_down(&bindings, Key::Q));
        assert_eq!(controls.axis(Axis::Rotate), 1);
        assert!(controls.is_held(Key::Q));

        assert!(controls.key_up(&bindings, Key::Q));
        assert_eq!(controls.axis(Axis::Rotate), 0);
        assert!(!controls.is_held(Key::Q));
    }

    #[test]
    fn test_opposite_key_does_not_override_active_axis() {
        let (mut controls, bindings) = state();

        controls.key_down(&bindings, Key::W);
        controls.key_down(&bindings, Key::S);
        assert_eq!(controls.axis(Axis::Trolley), 1);

        // releasing the key that never claimed the axis leaves it running
        controls.key_up(&bindings, Key::S);
        assert_eq!(controls.axis(Axis::Trolley), 1);

        controls.key_up(&bindings, Key::W);
        assert_eq!(controls.axis(Axis::Trolley), 0);
    }

    #[test]
    fn test_first_release_stops_axis() {
        let (mut controls, bindings) = state();

        controls.key_down(&bindings, Key::E);
        controls.key_down(&bindings, Key::D);
        controls.key_up(&bindings, Key::E);

        assert_eq!(controls.axis(Axis::Hook), 0);
        assert!(controls.is_held(Key::D));
    }

    #[test]
    fn test_axes_are_independent() {
        let (mut controls, bindings) = state();

        controls.key_down(&bindings, Key::A);
        controls.key_down(&bindings, Key::F);

        assert_eq!(controls.axis(Axis::Rotate), -1);
        assert_eq!(controls.axis(Axis::Claw), -1);
        assert_eq!(controls.axis(Axis::Trolley), 0);
    }

    #[test]
    fn test_suppressed_edges_are_ignored() {
        let (mut controls, bindings) = state();

        controls.key_down(&bindings, Key::Q);
        controls.suppress();
        assert!(controls.directives().is_idle());
        assert!(!controls.is_held(Key::Q));

        assert!(!controls.key_down(&bindings, Key::W));
        assert!(!controls.key_up(&bindings, Key::Q));
        assert!(controls.directives().is_idle());

        controls.restore();
        assert!(controls.key_down(&bindings, Key::W));
        assert_eq!(controls.axis(Axis::Trolley), 1);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let (mut controls, bindings) = state();
        assert!(!controls.key_down(&bindings, Key::Digit1));
        assert!(controls.directives().is_idle());
    }
}
