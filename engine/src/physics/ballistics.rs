//! Projectile engine
//!
//! A [`Bullet`] is one slot of a preallocated pool. Slots are never created
//! or destroyed during a match; they cycle through
//! `Unowned -> Active -> (Expired | Collided) -> Unowned`.
//!
//! Each frame an active bullet:
//! 1. gains speed along its heading during the boost window
//! 2. loses vertical speed to gravity (already scaled by the time rate)
//! 3. moves by `velocity * dt`
//! 4. steers toward its target if it is homing
//! 5. ages, and releases its slot once past the maximum lifetime
//!
//! Combatants are referenced by [`RoboId`] only. The target position is
//! looked up every frame through [`HomingTarget`], so a target that no
//! longer resolves simply stops the steering.
//!
//! # Example
//!
//! ```ignore
//! use robo_arena_engine::physics::ballistics::{Bullet, BulletConfig, Launch, RoboId};
//! use robo_arena_engine::physics::Vector3;
//!
//! let config = BulletConfig::default();
//! let mut bullet = Bullet::default();
//! let launch = Launch::ballistic(RoboId(0), Vector3::new(0.0, 1.0, 0.0), Vector3::ZERO);
//! bullet.initialize(&launch, &|_| None, &config);
//! bullet.update(16, 9.8, &|_| None, &config);
//! ```

use serde::{Deserialize, Serialize};

use super::types::{Matrix44, Vector3, VectorExt, aim_direction, normalize_angle};
use super::volumes::{Cuboid, Segment};

/// Stable handle of a combatant in the arena registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoboId(pub usize);

/// Resolves a combatant handle to the point a homing bullet steers at.
pub trait HomingTarget {
    fn homing_point(&self, id: RoboId) -> Option<Vector3>;
}

impl<F> HomingTarget for F
where
    F: Fn(RoboId) -> Option<Vector3>,
{
    fn homing_point(&self, id: RoboId) -> Option<Vector3> {
        self(id)
    }
}

/// Flight constants shared by every bullet.
///
/// Times are milliseconds, speeds m/s. The homing limits are expressed per
/// second of elapsed time, matching how `update` converts `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Lifetime after which the slot is released
    pub max_age_ms: u32,
    /// Launch speed
    pub speed0: f64,
    /// Speed reached at the end of the boost window
    pub speed_max: f64,
    /// Age at which the boost window opens
    pub boost_after_ms: u32,
    /// Length of the boost window
    pub boost_ms: u32,
    /// Horizontal steering gives up beyond this heading error (degrees)
    pub active_angle_limit: f64,
    /// Upper bound on the per-frame turn, divided by `dt` in seconds
    pub abs_angle_limit: f64,
    /// Turn allowance per frame, divided by age in seconds
    pub angle_per_age: f64,
    /// Collision margin around the flight path
    pub radius: f64,
    /// Hit points removed from a combatant on hit
    pub damage: f64,
    /// Uniform draw scale of the bullet model
    pub draw_scale: f64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            max_age_ms: 10_000,
            speed0: 50.0,
            speed_max: 60.0,
            boost_after_ms: 2_000,
            boost_ms: 1_000,
            active_angle_limit: 30.0,
            abs_angle_limit: 5.0e-3,
            angle_per_age: 200.0,
            radius: 0.1,
            damage: 0.05,
            draw_scale: 0.2,
        }
    }
}

impl BulletConfig {
    /// Speed gained per second inside the boost window.
    pub fn delta_speed(&self) -> f64 {
        if self.boost_ms == 0 {
            return 0.0;
        }
        (self.speed_max - self.speed0) / (self.boost_ms as f64 / 1e3)
    }

    /// Speed to add this frame for a bullet of `age_ms` advancing by `dt_ms`.
    ///
    /// A frame that straddles the opening of the window counts as inside it.
    pub fn calc_delta_speed(&self, age_ms: u32, dt_ms: u32) -> f64 {
        let reached = age_ms.saturating_add(dt_ms);
        if reached < self.boost_after_ms || reached > self.boost_after_ms + self.boost_ms {
            return 0.0;
        }
        self.delta_speed() * dt_ms as f64 / 1e3
    }
}

/// What a caller asks of a free slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub owner: RoboId,
    pub origin: Vector3,
    /// Aim angles `(pitch, yaw, _)` in degrees
    pub aim: Vector3,
    pub target: Option<RoboId>,
    pub homing: bool,
}

impl Launch {
    pub fn ballistic(owner: RoboId, origin: Vector3, aim: Vector3) -> Self {
        Self {
            owner,
            origin,
            aim,
            target: None,
            homing: false,
        }
    }
}

/// Observable lifecycle stage of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Unowned,
    Active,
    /// Hit something this frame; released by the next update
    Collided,
}

/// One projectile slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bullet {
    owner: Option<RoboId>,
    age_ms: u32,
    homing: bool,
    collided: bool,
    previous_point: Vector3,
    current_point: Vector3,
    velocity: Vector3,
    shooter: Option<RoboId>,
    target: Option<RoboId>,
}

impl Bullet {
    /// Claim this slot for `launch`.
    ///
    /// A homing launch aims straight at the target's current position. When
    /// the target does not resolve the bullet is launched ballistically.
    pub fn initialize(
        &mut self,
        launch: &Launch,
        targets: &impl HomingTarget,
        config: &BulletConfig,
    ) {
        debug_assert!(!self.is_owned(), "initializing a bullet slot that is still owned");

        let target_point = launch.target.and_then(|id| targets.homing_point(id));
        let homing = match (launch.homing, target_point) {
            (true, Some(_)) => true,
            (true, None) => {
                tracing::warn!(
                    owner = launch.owner.0,
                    target_id = ?launch.target,
                    "homing target does not resolve, launching ballistic"
                );
                false
            }
            (false, _) => false,
        };

        self.velocity = match target_point {
            Some(point) if homing => (point - launch.origin).normalize_to(config.speed0),
            _ => aim_direction(launch.aim) * config.speed0,
        };
        self.owner = Some(launch.owner);
        self.age_ms = 0;
        self.homing = homing;
        self.collided = false;
        self.previous_point = launch.origin;
        self.current_point = launch.origin;
        self.shooter = Some(launch.owner);
        self.target = launch.target;
    }

    /// Advance one frame. Unowned slots are left untouched.
    ///
    /// `gravity` is the effective gravitational acceleration for this frame
    /// (base gravity times the time rate).
    pub fn update(
        &mut self,
        dt_ms: u32,
        gravity: f64,
        targets: &impl HomingTarget,
        config: &BulletConfig,
    ) {
        if !self.is_owned() {
            return;
        }
        if self.collided {
            self.clear_owner();
            return;
        }

        let dt = dt_ms as f64 / 1e3;

        let boost = config.calc_delta_speed(self.age_ms, dt_ms);
        if boost > 0.0 && self.velocity.length() > 0.0 {
            self.velocity += self.velocity.normalize() * boost;
        }

        self.velocity.y -= gravity * dt;
        self.age_ms = self.age_ms.saturating_add(dt_ms);

        self.previous_point = self.current_point;
        self.current_point += self.velocity * dt;

        if self.homing && dt > 0.0 {
            if let Some(point) = self.target.and_then(|id| targets.homing_point(id)) {
                let age = self.age_ms as f64 / 1e3;
                self.fix_horizontal_velocity(point, age, dt, config);
                self.fix_vertical_velocity(point, age, dt, gravity, config);
            }
        }

        if self.age_ms > config.max_age_ms {
            self.clear_owner();
        }
    }

    fn fix_horizontal_velocity(&mut self, target: Vector3, age: f64, dt: f64, config: &BulletConfig) {
        let direction = target - self.current_point;
        let mut delta = normalize_angle(direction.heading_zx() - self.velocity.heading_zx());
        if delta <= -180.0 {
            delta += 360.0;
        }

        if delta.abs() > config.active_angle_limit {
            return;
        }

        let limit = (config.angle_per_age / age * dt).min(config.abs_angle_limit / dt);
        let delta = delta.clamp(-limit, limit);

        let mut rotation = Matrix44::identity();
        rotation.rotate_zx(delta);
        self.velocity = rotation.transform_direction(self.velocity);
    }

    fn fix_vertical_velocity(
        &mut self,
        target: Vector3,
        age: f64,
        dt: f64,
        gravity: f64,
        config: &BulletConfig,
    ) {
        let zx_distance = (target - self.current_point).horizontal_length();
        let zx_speed = self.velocity.horizontal_length();
        if zx_speed <= 0.0 {
            return;
        }

        let estimated_t = zx_distance / zx_speed;
        let y_at_estimated_t = self.velocity.y * estimated_t - 0.5 * gravity * estimated_t.powi(2);

        let max_age = config.max_age_ms as f64;
        let limit = (2.0 * gravity * max_age / age * dt).min(2.0 * gravity * 1e-3 / dt);
        let predicted = self.current_point.y + y_at_estimated_t;
        if predicted < target.y {
            self.velocity.y += limit;
        } else if predicted > target.y {
            self.velocity.y -= limit;
        }
    }

    fn clear_owner(&mut self) {
        self.owner = None;
        self.target = None;
    }

    /// Stop the bullet at `point`. The slot stays owned until the next update.
    pub fn burn_at(&mut self, point: Vector3) {
        self.collided = true;
        self.current_point = point;
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_owned_by(&self, id: RoboId) -> bool {
        self.owner == Some(id)
    }

    pub fn did_collide(&self) -> bool {
        self.collided
    }

    pub fn state(&self) -> BulletState {
        match (self.owner, self.collided) {
            (None, _) => BulletState::Unowned,
            (Some(_), false) => BulletState::Active,
            (Some(_), true) => BulletState::Collided,
        }
    }

    pub fn owner(&self) -> Option<RoboId> {
        self.owner
    }

    pub fn shooter(&self) -> Option<RoboId> {
        self.shooter
    }

    pub fn target(&self) -> Option<RoboId> {
        self.target
    }

    pub fn is_homing(&self) -> bool {
        self.homing
    }

    pub fn age_ms(&self) -> u32 {
        self.age_ms
    }

    pub fn position(&self) -> Vector3 {
        self.current_point
    }

    pub fn previous_position(&self) -> Vector3 {
        self.previous_point
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Orientation `(pitch, yaw, 0)` matching the flight direction.
    pub fn orientation(&self) -> Vector3 {
        let v = self.velocity;
        Vector3::new((-v.y).atan2(v.horizontal_length()).to_degrees(), v.heading_zx(), 0.0)
    }

    /// Path travelled during the last frame.
    pub fn locus_segment(&self) -> Segment {
        Segment::new(self.previous_point, self.current_point)
    }

    /// Box around the last frame's path, grown by the bullet radius.
    pub fn locus_cuboid(&self, config: &BulletConfig) -> Cuboid {
        Cuboid::spanning(self.previous_point, self.current_point, config.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_targets(_: RoboId) -> Option<Vector3> {
        None
    }

    fn launched(config: &BulletConfig) -> Bullet {
        let mut bullet = Bullet::default();
        let launch = Launch::ballistic(RoboId(0), Vector3::new(0.0, 1.0, 0.0), Vector3::ZERO);
        bullet.initialize(&launch, &no_targets, config);
        bullet
    }

    #[test]
    fn test_default_slot_is_unowned() {
        let bullet = Bullet::default();
        assert!(!bullet.is_owned());
        assert_eq!(bullet.state(), BulletState::Unowned);
    }

    #[test]
    fn test_ballistic_launch_follows_aim() {
        let config = BulletConfig::default();
        let bullet = launched(&config);
        assert!(bullet.is_owned_by(RoboId(0)));
        assert_eq!(bullet.shooter(), Some(RoboId(0)));
        assert!((bullet.velocity() - Vector3::new(0.0, 0.0, 50.0)).length() < 1e-9);
    }

    #[test]
    fn test_homing_launch_aims_at_target() {
        let config = BulletConfig::default();
        let targets = |_: RoboId| Some(Vector3::new(10.0, 1.0, 0.0));
        let mut bullet = Bullet::default();
        let launch = Launch {
            owner: RoboId(1),
            origin: Vector3::new(0.0, 1.0, 0.0),
            aim: Vector3::ZERO,
            target: Some(RoboId(0)),
            homing: true,
        };
        bullet.initialize(&launch, &targets, &config);

        assert!(bullet.is_homing());
        assert!((bullet.velocity() - Vector3::new(50.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_homing_without_target_falls_back() {
        let config = BulletConfig::default();
        let mut bullet = Bullet::default();
        let launch = Launch {
            homing: true,
            target: Some(RoboId(3)),
            ..Launch::ballistic(RoboId(0), Vector3::ZERO, Vector3::new(0.0, 90.0, 0.0))
        };
        bullet.initialize(&launch, &no_targets, &config);

        assert!(!bullet.is_homing());
        assert!((bullet.velocity() - Vector3::new(50.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_delta_speed_window() {
        let config = BulletConfig::default();
        assert_eq!(config.calc_delta_speed(0, 16), 0.0);
        assert_eq!(config.calc_delta_speed(2_500, 100), 1.0);
        assert_eq!(config.calc_delta_speed(3_100, 16), 0.0);
    }

    #[test]
    fn test_update_applies_gravity_and_moves() {
        let config = BulletConfig::default();
        let mut bullet = launched(&config);
        bullet.update(100, 9.8, &no_targets, &config);

        assert_eq!(bullet.age_ms(), 100);
        assert!((bullet.velocity().y + 0.98).abs() < 1e-9);
        assert!((bullet.position().z - 5.0).abs() < 1e-9);
        assert_eq!(bullet.previous_position(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_expires_after_max_age() {
        let config = BulletConfig::default();
        let mut bullet = launched(&config);
        bullet.update(config.max_age_ms + 1, 9.8, &no_targets, &config);

        assert!(!bullet.is_owned());
        assert_eq!(bullet.target(), None);
        assert_eq!(bullet.shooter(), Some(RoboId(0)));

        let parked = bullet.position();
        bullet.update(16, 9.8, &no_targets, &config);
        assert_eq!(bullet.position(), parked);
    }

    #[test]
    fn test_collided_bullet_released_on_next_update() {
        let config = BulletConfig::default();
        let mut bullet = launched(&config);
        bullet.burn_at(Vector3::new(0.0, 1.0, 3.0));

        assert_eq!(bullet.state(), BulletState::Collided);
        assert_eq!(bullet.position(), Vector3::new(0.0, 1.0, 3.0));

        bullet.update(16, 9.8, &no_targets, &config);
        assert_eq!(bullet.state(), BulletState::Unowned);
        assert_eq!(bullet.position(), Vector3::new(0.0, 1.0, 3.0));
    }

    #[test]
    fn test_homing_turns_toward_target() {
        let config = BulletConfig::default();
        let target = Vector3::new(5.0, 1.0, 40.0);
        let targets = move |_: RoboId| Some(target);

        let mut bullet = Bullet::default();
        let launch = Launch {
            owner: RoboId(0),
            origin: Vector3::new(0.0, 1.0, 0.0),
            aim: Vector3::ZERO,
            target: Some(RoboId(1)),
            homing: false,
        };
        bullet.initialize(&launch, &targets, &config);
        bullet.homing = true;

        bullet.update(16, 0.0, &targets, &config);
        assert!(bullet.velocity().x > 0.0);
    }

    #[test]
    fn test_homing_gives_up_outside_active_cone() {
        let config = BulletConfig::default();
        let behind = |_: RoboId| Some(Vector3::new(0.0, 1.0, -40.0));

        let mut bullet = launched(&config);
        bullet.homing = true;
        bullet.target = Some(RoboId(1));

        bullet.update(16, 0.0, &behind, &config);
        assert_eq!(bullet.velocity().x, 0.0);
    }

    #[test]
    fn test_locus_volumes_follow_path() {
        let config = BulletConfig::default();
        let mut bullet = launched(&config);
        bullet.update(100, 0.0, &no_targets, &config);

        let segment = bullet.locus_segment();
        assert_eq!(segment.from, Vector3::new(0.0, 1.0, 0.0));
        assert!((segment.to.z - 5.0).abs() < 1e-9);

        let cuboid = bullet.locus_cuboid(&config);
        assert!((cuboid.half_extents().z - 2.6).abs() < 1e-3);
    }

    #[test]
    fn test_orientation_matches_aim() {
        let config = BulletConfig::default();
        let mut bullet = Bullet::default();
        let aim = Vector3::new(20.0, 45.0, 0.0);
        bullet.initialize(&Launch::ballistic(RoboId(0), Vector3::ZERO, aim), &no_targets, &config);
        let orientation = bullet.orientation();
        assert!((orientation.x - 20.0).abs() < 1e-9);
        assert!((orientation.y - 45.0).abs() < 1e-9);
    }
}
