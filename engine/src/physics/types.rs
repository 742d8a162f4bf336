//! Vector and matrix primitives
//!
//! All simulation math runs in `f64` on glam's double-precision types.
//! Angles are degrees everywhere in the simulation; accumulated angles are
//! kept in `[-180, 180]` with [`normalize_angle`].
//!
//! Points and directions share [`Vector3`]. The homogeneous `w` component is
//! chosen where a transform is applied instead of being carried by the value:
//! [`Matrix44::transform_point`] uses `w = 1`, [`Matrix44::transform_direction`]
//! uses `w = 0`, [`Matrix44::multiply`] takes an explicit [`DVec4`] and
//! [`Matrix44::project`] performs the perspective divide.
//!
//! Nothing here signals errors. Normalizing a zero-length vector yields
//! NaN/inf and callers guard `length() > 0.0` where it matters.

pub use glam::{DMat4, DVec3, DVec4};

/// 3D vector used for positions, velocities, forces and angle triples.
pub type Vector3 = DVec3;

/// Operations the simulation needs beyond glam's built-in vector API.
pub trait VectorExt {
    /// Rescale to the given length. A zero vector yields NaN components.
    fn normalize_to(self, length: f64) -> Self;
    /// Raise every component to the power `n`.
    fn power(self, n: f64) -> Self;
    /// Length of the projection onto the horizontal (z-x) plane.
    fn horizontal_length(self) -> f64;
    /// Heading in the z-x plane in degrees, zero along +z, positive toward +x.
    fn heading_zx(self) -> f64;
}

impl VectorExt for DVec3 {
    fn normalize_to(self, length: f64) -> Self {
        self * (length / self.length())
    }

    fn power(self, n: f64) -> Self {
        self.powf(n)
    }

    fn horizontal_length(self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    fn heading_zx(self) -> f64 {
        self.x.atan2(self.z).to_degrees()
    }
}

/// Wrap an angle in degrees into `[-180, 180]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped < -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Wrap every component of an angle triple into `[-180, 180]`.
pub fn normalize_angles(angles: Vector3) -> Vector3 {
    Vector3::new(
        normalize_angle(angles.x),
        normalize_angle(angles.y),
        normalize_angle(angles.z),
    )
}

/// Unit direction for an aim angle triple `(pitch, yaw, _)`.
///
/// The forward axis is +z. Pitch is applied first (yz plane), then yaw
/// (zx plane); a positive pitch tilts the direction toward -y.
pub fn aim_direction(angles: Vector3) -> Vector3 {
    let mut rotation = Matrix44::identity();
    rotation.rotate(angles);
    rotation.transform_direction(Vector3::Z)
}

// ============================================================================
// MATRIX
// ============================================================================

/// Row-major 4x4 transform.
///
/// Every mutator pre-multiplies the accumulated transform, so operations
/// apply to a vector in the order they were called:
///
/// ```ignore
/// let mut m = Matrix44::identity();
/// m.rotate_zx(90.0);
/// m.translate(Vector3::new(0.0, 0.0, 5.0));
/// // rotates first, then translates
/// let p = m.transform_point(Vector3::Z);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix44(DMat4);

impl Default for Matrix44 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix44 {
    /// The identity transform.
    pub fn identity() -> Self {
        Self(DMat4::IDENTITY)
    }

    /// Build from rows (`rows[r][c]`).
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self(DMat4::from_cols_array_2d(&rows).transpose())
    }

    /// Rows of the matrix (`rows[r][c]`).
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        self.0.transpose().to_cols_array_2d()
    }

    /// Matrix product: `self = other * self`.
    pub fn dot(&mut self, other: &Matrix44) {
        self.0 = other.0 * self.0;
    }

    /// Full homogeneous transform of a 4-component vector.
    pub fn multiply(&self, operand: DVec4) -> DVec4 {
        self.0 * operand
    }

    /// Transform a point (`w = 1`). No perspective divide.
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        (self.0 * point.extend(1.0)).truncate()
    }

    /// Transform a direction (`w = 0`); translation does not apply.
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        (self.0 * direction.extend(0.0)).truncate()
    }

    /// Transform a point and divide by the resulting `w`.
    pub fn project(&self, point: Vector3) -> Vector3 {
        let clip = self.0 * point.extend(1.0);
        clip.truncate() / clip.w
    }

    /// Rotate in the z-x plane (about the y axis) by `angle` degrees.
    ///
    /// +z turns toward +x for positive angles.
    pub fn rotate_zx(&mut self, angle: f64) {
        self.0 = DMat4::from_rotation_y(angle.to_radians()) * self.0;
    }

    /// Rotate in the y-z plane (about the x axis) by `angle` degrees.
    ///
    /// +y turns toward +z for positive angles.
    pub fn rotate_yz(&mut self, angle: f64) {
        self.0 = DMat4::from_rotation_x(angle.to_radians()) * self.0;
    }

    /// Apply `angles.x` in the y-z plane, then `angles.y` in the z-x plane.
    ///
    /// Roll (`angles.z`) is not supported; combatants only yaw and views
    /// only pitch and yaw.
    pub fn rotate(&mut self, angles: Vector3) {
        self.rotate_yz(angles.x);
        self.rotate_zx(angles.y);
    }

    /// Uniform scale of x and y; z is left untouched.
    pub fn scale(&mut self, factor: f64) {
        self.0 = DMat4::from_scale(DVec3::new(factor, factor, 1.0)) * self.0;
    }

    /// Translate by `delta`.
    pub fn translate(&mut self, delta: Vector3) {
        self.0 = DMat4::from_translation(delta) * self.0;
    }

    /// Apply a perspective projection looking down -z.
    ///
    /// `angle_of_view` is the vertical field of view in degrees and `aspect`
    /// is width / height. After [`Matrix44::project`], points on the near
    /// plane land on z = 0 and points on the far plane on z = 1.
    pub fn perspective(&mut self, angle_of_view: f64, aspect: f64, near_clip: f64, far_clip: f64) {
        let s = 1.0 / (angle_of_view / 2.0).to_radians().tan();
        let k = 1.0 / aspect;
        let b = far_clip / (near_clip - far_clip);
        let a = near_clip * b;

        let projection = Matrix44::from_rows([
            [s * k, 0.0, 0.0, 0.0],
            [0.0, s, 0.0, 0.0],
            [0.0, 0.0, b, a],
            [0.0, 0.0, -1.0, 0.0],
        ]);
        self.dot(&projection);
    }
}
