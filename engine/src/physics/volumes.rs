//! Bounding volumes
//!
//! Discrete per-frame shape tests used by collision detection:
//!
//! - [`Cuboid`] - axis-aligned box, integer-quantized so repeated tests
//!   against the same inputs never drift
//! - [`Sphere`] - cheap combatant proxy, squared-distance test
//! - [`Segment`] - sweep segment tested against [`Triangle`]s
//!
//! Static geometry exposes its world-space triangles through
//! [`TriangleSource`], which is what segment sweeps run against.
//!
//! # Example
//!
//! ```ignore
//! use robo_arena_engine::physics::volumes::{Segment, Triangle};
//! use robo_arena_engine::physics::Vector3;
//!
//! let floor = Triangle::new(
//!     Vector3::new(-1.0, 0.0, -1.0),
//!     Vector3::new(1.0, 0.0, -1.0),
//!     Vector3::new(0.0, 0.0, 1.0),
//! );
//! let drop = Segment::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
//!
//! if let Some(hit) = drop.get_intersected_point(&floor) {
//!     println!("hit at {hit:?}");
//! }
//! ```

use super::types::Vector3;

/// Fixed-point scale applied to cuboid coordinates (1 unit = 1 mm).
pub const CUBOID_QUANTIZATION: f64 = 1000.0;

fn quantize(value: f64) -> i64 {
    (value * CUBOID_QUANTIZATION) as i64
}

// ============================================================================
// CUBOID
// ============================================================================

/// Axis-aligned box stored as quantized center and half-extents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cuboid {
    center: [i64; 3],
    half: [i64; 3],
}

impl Cuboid {
    /// Create a cuboid from a center point and (non-negative) half-extents.
    pub fn new(center: Vector3, half_extents: Vector3) -> Self {
        Self {
            center: [quantize(center.x), quantize(center.y), quantize(center.z)],
            half: [
                quantize(half_extents.x),
                quantize(half_extents.y),
                quantize(half_extents.z),
            ],
        }
    }

    /// Smallest cuboid containing both corners, grown by `margin` on every side.
    pub fn spanning(a: Vector3, b: Vector3, margin: f64) -> Self {
        let center = (a + b) * 0.5;
        let half = (a - b).abs() * 0.5 + Vector3::splat(margin);
        Self::new(center, half)
    }

    pub fn set_center(&mut self, center: Vector3) {
        self.center = [quantize(center.x), quantize(center.y), quantize(center.z)];
    }

    pub fn set_half_extents(&mut self, half_extents: Vector3) {
        self.half = [
            quantize(half_extents.x),
            quantize(half_extents.y),
            quantize(half_extents.z),
        ];
    }

    /// Center in world units (after quantization).
    pub fn center(&self) -> Vector3 {
        Vector3::new(
            self.center[0] as f64,
            self.center[1] as f64,
            self.center[2] as f64,
        ) / CUBOID_QUANTIZATION
    }

    /// Half-extents in world units (after quantization).
    pub fn half_extents(&self) -> Vector3 {
        Vector3::new(self.half[0] as f64, self.half[1] as f64, self.half[2] as f64)
            / CUBOID_QUANTIZATION
    }

    /// Strict overlap test. Touching faces do not intersect.
    ///
    /// Axes are checked x, y, z and the test stops at the first separating one.
    pub fn does_intersect(&self, other: &Cuboid) -> bool {
        (0..3).all(|axis| {
            let a0 = self.center[axis] - self.half[axis];
            let a1 = self.center[axis] + self.half[axis];
            let b0 = other.center[axis] - other.half[axis];
            let b1 = other.center[axis] + other.half[axis];
            a0 < b1 && a1 > b0
        })
    }
}

// ============================================================================
// SPHERE
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Spheres whose centers are exactly `r1 + r2` apart do not intersect.
    pub fn does_intersect(&self, other: &Sphere) -> bool {
        let combined = self.radius + other.radius;
        self.center.distance_squared(other.center) < combined * combined
    }
}

// ============================================================================
// TRIANGLE / SEGMENT
// ============================================================================

/// Three vertices of static or combatant geometry in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangle {
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
}

impl Triangle {
    pub fn new(p0: Vector3, p1: Vector3, p2: Vector3) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn centroid(&self) -> Vector3 {
        (self.p0 + self.p1 + self.p2) / 3.0
    }

    /// Copy moved by `offset`.
    pub fn translated(&self, offset: Vector3) -> Self {
        Self::new(self.p0 + offset, self.p1 + offset, self.p2 + offset)
    }
}

/// Anything that can hand out world-space triangles for segment sweeps.
pub trait TriangleSource {
    fn triangles(&self) -> &[Triangle];
}

impl TriangleSource for [Triangle] {
    fn triangles(&self) -> &[Triangle] {
        self
    }
}

impl TriangleSource for Vec<Triangle> {
    fn triangles(&self) -> &[Triangle] {
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Segment {
    pub from: Vector3,
    pub to: Vector3,
}

impl Segment {
    pub fn new(from: Vector3, to: Vector3) -> Self {
        Self { from, to }
    }

    /// Point where this segment crosses `triangle`, if it does.
    ///
    /// The segment is `a + t b` for `t` in `[0, 1]` and the triangle is
    /// `c + u d + v e`. The crossing `t` comes from the plane equation; `u`
    /// and `v` are solved by Cramer's rule on the dot products of `d`, `e`
    /// and `g = p - c`. Segments parallel to the plane and degenerate
    /// triangles never intersect.
    pub fn get_intersected_point(&self, triangle: &Triangle) -> Option<Vector3> {
        let a = self.from;
        let b = self.to - self.from;

        let c = triangle.p0;
        let d = triangle.p1 - triangle.p0;
        let e = triangle.p2 - triangle.p0;

        let n = d.cross(e);
        let bn = b.dot(n);
        if bn == 0.0 {
            return None;
        }

        let t = (c - a).dot(n) / bn;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        let p = a + b * t;
        let g = p - c;

        let dd = d.dot(d);
        let de = d.dot(e);
        let ed = e.dot(d);
        let ee = e.dot(e);
        let gd = g.dot(d);
        let ge = g.dot(e);

        let u_denominator = dd * ee - de * ed;
        let v_denominator = ed * de - ee * dd;
        if u_denominator == 0.0 || v_denominator == 0.0 {
            return None;
        }

        let u = (gd * ee - ge * ed) / u_denominator;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let v = (gd * de - ge * dd) / v_denominator;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        Some(p)
    }

    /// First triangle hit along the source's triangle order.
    pub fn first_hit(&self, source: &(impl TriangleSource + ?Sized)) -> Option<Vector3> {
        source
            .triangles()
            .iter()
            .find_map(|triangle| self.get_intersected_point(triangle))
    }
}
