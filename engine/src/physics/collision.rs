//! Collision response primitives
//!
//! Every combatant carries a [`PendingMove`] for the frame: the force
//! accumulator, the velocity and the displacement it intends to apply.
//! The slides here only ever remove components from those three vectors;
//! committing the move to the combatant's position happens elsewhere, after
//! every pass has run.
//!
//! # Strategies
//!
//! - [`slide_by_cuboid`] - axis slide. Rebuilds the mover's box from the
//!   pending delta before each axis check and zeroes the offending axis.
//! - [`slide_by_sphere`] - removes the part of the move that points along
//!   the line joining the two centers. Separating contacts are left alone.
//! - [`slide_by_segments`] - sweeps a bounding cross against triangles and
//!   removes the part of the move that points toward the first hit.
//!
//! # Example
//!
//! ```ignore
//! use robo_arena_engine::physics::collision::{slide_by_cuboid, PendingMove, GROUND_AXIS_ORDER};
//! use robo_arena_engine::physics::volumes::Cuboid;
//!
//! let ground = Cuboid::new(Vector3::new(0.0, -100.0, 0.0), Vector3::splat(100.0));
//! let mut pending = PendingMove::new(force, velocity, delta);
//! slide_by_cuboid(&mut pending, |delta| Cuboid::new(position + delta, half), &ground, &GROUND_AXIS_ORDER);
//! ```

use super::types::Vector3;
use super::volumes::{Cuboid, Segment, Sphere, TriangleSource};

/// A combatant's proposed motion for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingMove {
    pub force: Vector3,
    pub velocity: Vector3,
    pub delta: Vector3,
}

impl PendingMove {
    pub fn new(force: Vector3, velocity: Vector3, delta: Vector3) -> Self {
        Self {
            force,
            velocity,
            delta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn zero(self, v: &mut Vector3) {
        match self {
            Axis::X => v.x = 0.0,
            Axis::Y => v.y = 0.0,
            Axis::Z => v.z = 0.0,
        }
    }
}

/// Axis order used against the ground and, when selected, against the opponent.
pub const GROUND_AXIS_ORDER: [Axis; 3] = [Axis::Y, Axis::Z, Axis::X];

/// Zero pending delta and velocity one axis at a time while the mover's box
/// still intersects `obstacle`.
///
/// `volume_at` builds the mover's box for a given pending delta; it is
/// called again after every correction. Returns the axes that were zeroed.
pub fn slide_by_cuboid(
    pending: &mut PendingMove,
    volume_at: impl Fn(Vector3) -> Cuboid,
    obstacle: &Cuboid,
    order: &[Axis],
) -> Vec<Axis> {
    let mut zeroed = Vec::new();
    for &axis in order {
        if volume_at(pending.delta).does_intersect(obstacle) {
            axis.zero(&mut pending.delta);
            axis.zero(&mut pending.velocity);
            zeroed.push(axis);
        }
    }
    zeroed
}

/// Remove the approach along the center line when the prospective sphere
/// intersects `obstacle`.
///
/// `mover` is the sphere at the committed position; the pending delta is
/// added to it for the test. Returns `true` if the move was changed.
pub fn slide_by_sphere(pending: &mut PendingMove, mover: &Sphere, obstacle: &Sphere) -> bool {
    let prospective = Sphere::new(mover.center + pending.delta, mover.radius);
    if !prospective.does_intersect(obstacle) {
        return false;
    }

    let line = obstacle.center - mover.center;
    if line.length() <= 0.0 {
        return false;
    }
    let direction = line.normalize();

    let approach = pending.delta.dot(direction);
    if approach <= 0.0 {
        return false;
    }

    pending.delta -= direction * approach;
    let closing = pending.velocity.dot(direction);
    if closing > 0.0 {
        pending.velocity -= direction * closing;
    }
    true
}

/// Sweep `segments` against `source`; on the first hit remove the parts of
/// force, velocity and pending delta that point from `center` toward it.
///
/// Returns the hit point, if any.
pub fn slide_by_segments(
    pending: &mut PendingMove,
    center: Vector3,
    segments: &[Segment],
    source: &(impl TriangleSource + ?Sized),
) -> Option<Vector3> {
    let hit = segments.iter().find_map(|segment| segment.first_hit(source))?;

    let toward = hit - center;
    if toward.length() <= 0.0 {
        return Some(hit);
    }
    let direction = toward.normalize();

    for v in [&mut pending.force, &mut pending.velocity, &mut pending.delta] {
        let along = v.dot(direction);
        if along > 0.0 {
            *v -= direction * along;
        }
    }
    Some(hit)
}
