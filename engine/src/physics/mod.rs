//! Physics module for the arena simulation
//!
//! Everything the two combatants and their projectiles need to move and
//! collide, built without an external physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Mass in kg
//! - Time steps in whole milliseconds
//! - Angles in degrees
//!
//! # Submodules
//!
//! - [`types`] - Vector/matrix primitives on glam's `f64` types
//! - [`volumes`] - Cuboid, sphere, segment and triangle tests
//! - [`ballistics`] - Projectile slots with boost and homing
//! - [`collision`] - Slide responses over a combatant's pending move

pub mod ballistics;
pub mod collision;
pub mod types;
pub mod volumes;

pub use ballistics::{Bullet, BulletConfig, BulletState, HomingTarget, Launch, RoboId};
pub use collision::{Axis, GROUND_AXIS_ORDER, PendingMove, slide_by_cuboid, slide_by_segments, slide_by_sphere};
pub use types::{
    DMat4, DVec3, DVec4, Matrix44, Vector3, VectorExt, aim_direction, normalize_angle, normalize_angles,
};
pub use volumes::{Cuboid, Segment, Sphere, Triangle, TriangleSource};
