//! Game Module
//!
//! The two-combatant arena built on top of the engine: combatant physics,
//! the projectile pool, collision passes and the per-frame step.

pub mod arena;
pub mod config;
pub mod robo;
pub mod systems;

pub use arena::{Arena, ArenaStatus, FrameReport, RoboStatus};
pub use config::{ContactShape, Tuning, TuningError};
pub use robo::{LockOnConfig, Robo, RoboConfig, WeaponState};
pub use systems::{Armoury, ArmouryConfig, CollisionSystem};

pub use crate::physics::RoboId;
