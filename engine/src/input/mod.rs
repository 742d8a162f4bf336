//! Input Module
//!
//! Platform-agnostic input surface. The host translates its own key events
//! into [`KeyCode`]s; [`KeyBindings`] turns them into logical [`Action`]s
//! tracked by an [`ActionState`]. The simulation only ever reads an
//! [`InputProvider`].
//!
//! # Example
//!
//! ```rust,ignore
//! use robo_arena_engine::input::{Action, ActionState, InputProvider, KeyBindings, KeyCode};
//!
//! let bindings = KeyBindings::new();
//! let mut state = ActionState::new();
//!
//! bindings.handle_key(KeyCode::W, true, &mut state);
//! if state.is_on(Action::MoveForward) {
//!     // run forward
//! }
//! state.end_frame();
//! ```

pub mod actions;
pub mod bindings;
pub mod keyboard;

pub use actions::{Action, ActionFlags, ActionState, InputProvider, ScriptedInput};
pub use bindings::KeyBindings;
pub use keyboard::KeyCode;
