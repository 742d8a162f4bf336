//! Game systems - self-contained modules that own state and logic.

pub mod armoury;
pub mod collision_system;

pub use armoury::{Armoury, ArmouryConfig, COMBATANTS, DEFAULT_QUOTA};
pub use collision_system::CollisionSystem;
