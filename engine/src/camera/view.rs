//! Combatant view
//!
//! Each combatant owns one [`View`]: a camera that trails it from a fixed
//! local offset, can be tilted and turned by look input, and supplies the
//! projection matrix for drawing. The view's pitch also drives aiming and
//! the lock-on sighting cone.
//!
//! Key features:
//! - Smoothed follow: moves a fixed fraction of the way to the target point
//!   each frame
//! - Look offset in degrees, scaled by the frame delta
//! - Pitch clamped so the camera never flips over

use serde::{Deserialize, Serialize};

use crate::physics::{Matrix44, Vector3, aim_direction, normalize_angle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Camera point relative to the combatant, before its heading is applied
    pub follow_offset: Vector3,
    /// Fraction of the remaining distance covered per frame
    pub follow_rate: f64,
    /// Camera position before the first follow
    pub first_position: Vector3,
    /// Look speed in degrees per millisecond
    pub look_per_ms: f64,
    /// Vertical field of view in degrees
    pub angle_of_view: f64,
    /// Field of view change in degrees per millisecond
    pub angle_of_view_per_ms: f64,
    /// Field of view bounds in degrees
    pub angle_of_view_range: (f64, f64),
    pub pitch_limit: f64,
    pub near_clip: f64,
    pub far_clip: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            follow_offset: Vector3::new(0.0, 1.2, -0.9),
            follow_rate: 0.4,
            first_position: Vector3::new(0.0, 1.6, 0.0),
            look_per_ms: 0.1,
            angle_of_view: 90.0,
            angle_of_view_per_ms: 0.1,
            angle_of_view_range: (10.0, 150.0),
            pitch_limit: 89.0,
            near_clip: 0.5,
            far_clip: 1000.0,
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    config: ViewConfig,
    position: Vector3,
    /// Camera orientation `(pitch, yaw, _)`, updated on follow
    angle: Vector3,
    /// Look offset `(pitch, yaw, _)` added on top of the followed heading
    look: Vector3,
    angle_of_view: f64,
}

impl View {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            position: config.first_position,
            angle: Vector3::ZERO,
            look: Vector3::ZERO,
            angle_of_view: config.angle_of_view,
            config,
        }
    }

    /// Move toward the point behind `center` and face along `heading`.
    pub fn follow(&mut self, center: Vector3, heading: f64) {
        let mut rotation = Matrix44::identity();
        rotation.rotate_zx(heading);
        let target = center + rotation.transform_direction(self.config.follow_offset);

        self.position += (target - self.position) * self.config.follow_rate;
        self.angle = Vector3::new(self.look.x, normalize_angle(heading + self.look.y), 0.0);
    }

    /// Turn the look offset by `direction` (pitch, yaw) for `dt_ms`.
    pub fn rotate(&mut self, direction: Vector3, dt_ms: u32) {
        let step = direction * (self.config.look_per_ms * dt_ms as f64);
        let limit = self.config.pitch_limit;
        self.look.x = (self.look.x + step.x).clamp(-limit, limit);
        self.look.y = normalize_angle(self.look.y + step.y);
    }

    pub fn widen(&mut self, dt_ms: u32) {
        self.set_angle_of_view(self.angle_of_view + self.config.angle_of_view_per_ms * dt_ms as f64);
    }

    pub fn narrow(&mut self, dt_ms: u32) {
        self.set_angle_of_view(self.angle_of_view - self.config.angle_of_view_per_ms * dt_ms as f64);
    }

    fn set_angle_of_view(&mut self, angle_of_view: f64) {
        let (min, max) = self.config.angle_of_view_range;
        self.angle_of_view = angle_of_view.clamp(min, max);
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn angle(&self) -> Vector3 {
        self.angle
    }

    pub fn look(&self) -> Vector3 {
        self.look
    }

    pub fn pitch(&self) -> f64 {
        self.look.x
    }

    pub fn angle_of_view(&self) -> f64 {
        self.angle_of_view
    }

    pub fn near_clip(&self) -> f64 {
        self.config.near_clip
    }

    pub fn far_clip(&self) -> f64 {
        self.config.far_clip
    }

    /// Unit vector the camera looks along.
    pub fn facing(&self) -> Vector3 {
        aim_direction(self.angle)
    }

    /// World to clip space for the current camera.
    ///
    /// The camera looks along [`View::facing`]; the projection looks down
    /// -z, so the view is turned half a revolution before projecting.
    pub fn perspective_matrix(&self) -> Matrix44 {
        let aspect = self.config.width as f64 / self.config.height.max(1) as f64;

        let mut m = Matrix44::identity();
        m.translate(-self.position);
        m.rotate_zx(-self.angle.y);
        m.rotate_yz(-self.angle.x);
        m.rotate_zx(180.0);
        m.perspective(self.angle_of_view, aspect, self.config.near_clip, self.config.far_clip);
        m
    }
}
