//! Logical actions and the input-provider surface
//!
//! The simulation only asks two questions of its input: "is this action
//! held" and "was it pressed this frame". [`ActionState`] answers them for
//! a live keyboard, [`ScriptedInput`] for a fixed replay.

use std::collections::HashMap;

/// Everything a combatant's controller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    // Movement
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    TurnLeft,
    TurnRight,
    Boost,

    // Combat
    Fire,

    // Camera
    LookUp,
    LookDown,
    LookLeft,
    LookRight,
    ZoomIn,
    ZoomOut,

    // Time rate
    SpeedUp,
    SlowDown,

    // System
    Reset,
    Terminate,
}

impl Action {
    pub const ALL: [Action; 18] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::MoveLeft,
        Action::MoveRight,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Boost,
        Action::Fire,
        Action::LookUp,
        Action::LookDown,
        Action::LookLeft,
        Action::LookRight,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::SpeedUp,
        Action::SlowDown,
        Action::Reset,
        Action::Terminate,
    ];
}

/// Per-frame input queries.
pub trait InputProvider {
    /// Action is held this frame.
    fn is_on(&self, action: Action) -> bool;
    /// Action went from released to held this frame.
    fn is_triggered(&self, action: Action) -> bool;
}

/// State of one action (pressed or released)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionFlags {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

/// Held / just-pressed bookkeeping fed by key events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionState {
    actions: HashMap<Action, ActionFlags>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State where exactly `held` are pressed, all of them fresh this frame.
    pub fn pressed(held: &[Action]) -> Self {
        let mut state = Self::new();
        for &action in held {
            state.set(action, true);
        }
        state
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        let flags = self.actions.entry(action).or_default();
        flags.just_pressed = pressed && !flags.pressed;
        flags.just_released = !pressed && flags.pressed;
        flags.pressed = pressed;
    }

    /// Clear per-frame flags (call at end of frame).
    pub fn end_frame(&mut self) {
        for flags in self.actions.values_mut() {
            flags.just_pressed = false;
            flags.just_released = false;
        }
    }

    pub fn is_released(&self, action: Action) -> bool {
        self.actions.get(&action).is_some_and(|f| f.just_released)
    }

    pub fn held(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions
            .iter()
            .filter(|(_, flags)| flags.pressed)
            .map(|(&action, _)| action)
    }
}

impl InputProvider for ActionState {
    fn is_on(&self, action: Action) -> bool {
        self.actions.get(&action).is_some_and(|f| f.pressed)
    }

    fn is_triggered(&self, action: Action) -> bool {
        self.actions.get(&action).is_some_and(|f| f.just_pressed)
    }
}

/// Replays a fixed list of held-action frames.
///
/// Each frame lists the actions held during it; "triggered" is derived from
/// the previous frame. Past the end of the script nothing is held.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<Vec<Action>>,
    cursor: usize,
    state: ActionState,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<Action>>) -> Self {
        Self {
            frames,
            cursor: 0,
            state: ActionState::new(),
        }
    }

    /// Hold `held` for `count` consecutive frames.
    pub fn repeat(held: &[Action], count: usize) -> Self {
        Self::new(vec![held.to_vec(); count])
    }

    /// Append `count` frames holding `held`.
    pub fn then(mut self, held: &[Action], count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(held.to_vec(), count));
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    /// Advance to the next frame and return its input.
    pub fn next_frame(&mut self) -> &ActionState {
        self.state.end_frame();
        let held = self.frames.get(self.cursor).cloned().unwrap_or_default();
        for action in Action::ALL {
            self.state.set(action, held.contains(&action));
        }
        self.cursor += 1;
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_state_just_pressed() {
        let mut state = ActionState::new();
        state.set(Action::Fire, true);
        assert!(state.is_on(Action::Fire));
        assert!(state.is_triggered(Action::Fire));

        state.end_frame();
        state.set(Action::Fire, true);
        assert!(state.is_on(Action::Fire));
        assert!(!state.is_triggered(Action::Fire));

        state.set(Action::Fire, false);
        assert!(!state.is_on(Action::Fire));
        assert!(state.is_released(Action::Fire));
    }

    #[test]
    fn test_scripted_input_derives_triggers() {
        let mut script = ScriptedInput::repeat(&[Action::SpeedUp], 2).then(&[], 1);
        assert_eq!(script.len(), 3);

        assert!(script.next_frame().is_triggered(Action::SpeedUp));
        let second = script.next_frame();
        assert!(second.is_on(Action::SpeedUp));
        assert!(!second.is_triggered(Action::SpeedUp));
        assert!(!script.next_frame().is_on(Action::SpeedUp));
        assert!(script.is_finished());
        assert!(!script.next_frame().is_on(Action::SpeedUp));
    }

    #[test]
    fn test_pressed_constructor() {
        let state = ActionState::pressed(&[Action::MoveForward, Action::Boost]);
        let mut held: Vec<Action> = state.held().collect();
        held.sort();
        assert_eq!(held, vec![Action::MoveForward, Action::Boost]);
    }
}
