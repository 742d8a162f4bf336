//! World Module
//!
//! The collaborators the simulation talks to but does not own the logic of:
//! the frame time source, models and their geometry, the render sink, and
//! the static terrain (ground and walls).

pub mod clock;
pub mod model;
pub mod render;
pub mod terrain;

pub use clock::{FrameClock, MatchTimer};
pub use model::{Geometry, Model, ModelDatabase};
pub use render::{ClipVertex, DrawBatch, FrameRecorder, RenderSink};
pub use terrain::{Ground, Wall};
