//! Config Module
//!
//! The tuning table that drives an arena: physics constants, layout and
//! collision strategy.

pub mod tuning;

pub use tuning::{
    CollisionConfig, ContactShape, EnvironmentConfig, LayoutConfig, Tuning, TuningError,
};
