//! Input Bindings Module
//!
//! Maps physical keys to logical [`Action`]s so simulation code never sees
//! a key code, and feeds key events into an [`ActionState`].

use std::collections::{HashMap, HashSet};

use super::KeyCode;
use super::actions::{Action, ActionState};

/// Maps physical keys to logical actions, one key per action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, Action>,
    /// Map from logical action to physical key (for reverse lookup and display)
    action_to_key: HashMap<Action, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    ///
    /// Default bindings:
    /// - W / S = MoveForward / MoveBack
    /// - A / D = MoveLeft / MoveRight
    /// - Q / E = TurnLeft / TurnRight
    /// - Space = Boost, F = Fire
    /// - Arrows = Look
    /// - PageUp / PageDown = ZoomIn / ZoomOut
    /// - `=` / `-` = SpeedUp / SlowDown
    /// - R = Reset, Escape = Terminate
    pub fn new() -> Self {
        let mut bindings = Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        };

        bindings.bind(KeyCode::W, Action::MoveForward);
        bindings.bind(KeyCode::S, Action::MoveBack);
        bindings.bind(KeyCode::A, Action::MoveLeft);
        bindings.bind(KeyCode::D, Action::MoveRight);
        bindings.bind(KeyCode::Q, Action::TurnLeft);
        bindings.bind(KeyCode::E, Action::TurnRight);
        bindings.bind(KeyCode::Space, Action::Boost);
        bindings.bind(KeyCode::F, Action::Fire);
        bindings.bind(KeyCode::ArrowUp, Action::LookUp);
        bindings.bind(KeyCode::ArrowDown, Action::LookDown);
        bindings.bind(KeyCode::ArrowLeft, Action::LookLeft);
        bindings.bind(KeyCode::ArrowRight, Action::LookRight);
        bindings.bind(KeyCode::PageUp, Action::ZoomIn);
        bindings.bind(KeyCode::PageDown, Action::ZoomOut);
        bindings.bind(KeyCode::Equal, Action::SpeedUp);
        bindings.bind(KeyCode::Minus, Action::SlowDown);
        bindings.bind(KeyCode::R, Action::Reset);
        bindings.bind(KeyCode::Escape, Action::Terminate);

        bindings
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// If the action was previously bound to another key, that binding is also removed.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }

        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }

        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&action);
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<Action> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: Action) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// Check if an action is pressed, given a set of pressed keys.
    pub fn is_action_pressed(&self, action: Action, pressed_keys: &HashSet<KeyCode>) -> bool {
        self.action_to_key
            .get(&action)
            .is_some_and(|key| pressed_keys.contains(key))
    }

    /// Forward a key event to `state`. Returns `false` for unbound keys.
    pub fn handle_key(&self, key: KeyCode, pressed: bool, state: &mut ActionState) -> bool {
        match self.get_action(key) {
            Some(action) => {
                state.set(action, pressed);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputProvider;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(Action::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::S), Some(Action::MoveBack));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(Action::Boost));
        assert_eq!(bindings.get_action(KeyCode::F), Some(Action::Fire));
        assert_eq!(bindings.get_action(KeyCode::Escape), Some(Action::Terminate));
        assert_eq!(bindings.get_action(KeyCode::Unknown), None);
    }

    #[test]
    fn test_every_action_has_a_key() {
        let bindings = KeyBindings::new();
        for action in Action::ALL {
            assert!(bindings.get_key(action).is_some(), "{action:?} is unbound");
        }
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::new();

        bindings.bind(KeyCode::Z, Action::Fire);

        assert_eq!(bindings.get_action(KeyCode::F), None);
        assert_eq!(bindings.get_action(KeyCode::Z), Some(Action::Fire));
        assert_eq!(bindings.get_key(Action::Fire), Some(KeyCode::Z));
    }

    #[test]
    fn test_is_action_pressed() {
        let bindings = KeyBindings::new();

        let mut pressed = HashSet::new();
        pressed.insert(KeyCode::W);

        assert!(bindings.is_action_pressed(Action::MoveForward, &pressed));
        assert!(!bindings.is_action_pressed(Action::MoveBack, &pressed));
    }

    #[test]
    fn test_unbind_key() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_key(KeyCode::W);

        assert_eq!(bindings.get_action(KeyCode::W), None);
        assert_eq!(bindings.get_key(Action::MoveForward), None);
    }

    #[test]
    fn test_handle_key_updates_state() {
        let bindings = KeyBindings::new();
        let mut state = ActionState::new();

        assert!(bindings.handle_key(KeyCode::F, true, &mut state));
        assert!(!bindings.handle_key(KeyCode::X, true, &mut state));
        assert!(state.is_triggered(Action::Fire));
    }
}
