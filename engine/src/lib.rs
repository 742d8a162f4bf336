//! Robo Arena Engine Library
//!
//! Simulation core for a two-combatant arena shooter: combatants with
//! force-based movement, a pooled projectile engine with homing, and a
//! fixed-order collision resolver. Rendering, windowing and input polling
//! stay with the host; the core talks to them through small traits.
//!
//! # Modules
//!
//! - [`physics`] - Vector/matrix primitives, bounding volumes, projectiles, slides
//! - [`world`] - Frame clock, models, render sink, ground and walls
//! - [`camera`] - Per-combatant follow view and projection
//! - [`input`] - Logical actions, key bindings and scripted input
//! - [`game`] - Combatants, armoury, collision passes and the arena step
//!
//! # Example
//!
//! ```ignore
//! use robo_arena_engine::game::{Arena, Tuning};
//! use robo_arena_engine::input::{Action, ActionState};
//!
//! let mut arena = Arena::new(Tuning::default())?;
//! let forward = ActionState::pressed(&[Action::MoveForward, Action::Fire]);
//! let idle = ActionState::new();
//!
//! let report = arena.step([&forward, &idle], 16);
//! if report.match_over {
//!     println!("{:?}", arena.status().winner);
//! }
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types
pub use game::{Arena, ArenaStatus, FrameReport, Tuning, TuningError};
pub use input::{Action, ActionState, InputProvider, KeyCode};
pub use physics::{Matrix44, RoboId, Vector3};
