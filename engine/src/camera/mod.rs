//! Camera Module
//!
//! The per-combatant view: follow camera, look offset and projection.
//! Window-system agnostic, it only deals with camera state and math.

pub mod view;

pub use view::{View, ViewConfig};
