//! Combatant physics
//!
//! A [`Robo`] integrates its own forces into a *pending move* each frame
//! but never moves itself: the collision system trims the pending move
//! first, and [`Robo::commit_next_position`] applies what is left.
//!
//! Per frame, in order:
//! 1. [`Robo::lock_on`] - grow or reset the lock-on latch
//! 2. [`Robo::set_delta_next_position`] - drag, friction, integration
//! 3. [`Robo::charge_weapon`] - weapon cooldown
//! 4. the view follows the combatant
//!
//! Controller input (`run`, `boost`, `rotate_zx`, `fire_bullet`) is applied
//! before the update and only ever adds to the force accumulator.

use serde::{Deserialize, Serialize};

use crate::camera::{View, ViewConfig};
use crate::physics::{
    Cuboid, HomingTarget, Launch, Matrix44, PendingMove, RoboId, Segment, Sphere, Triangle, Vector3,
    normalize_angle, normalize_angles,
};
use crate::world::{Model, RenderSink};

use super::systems::Armoury;

/// Lock-on sighting cone and dwell time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockOnConfig {
    pub min_depth: f64,
    pub max_depth: f64,
    /// Half angle of the cone at `max_depth`, in degrees
    pub half_theta_at_max_depth: f64,
    pub complete_ms: u32,
}

impl Default for LockOnConfig {
    fn default() -> Self {
        Self {
            min_depth: 3.0,
            max_depth: 100.0,
            half_theta_at_max_depth: 1.0,
            complete_ms: 3000,
        }
    }
}

impl LockOnConfig {
    /// Half angle (degrees) of the sighting cone at `depth`. The cone keeps a
    /// constant half height, so it widens as the opponent gets closer.
    pub fn half_theta_at(&self, depth: f64) -> f64 {
        let half_height = self.max_depth * self.half_theta_at_max_depth.to_radians().tan();
        half_height.atan2(depth).to_degrees()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoboConfig {
    pub mass: f64,
    pub half_width: f64,
    pub height: f64,
    pub air_density: f64,
    pub drag_coefficient: f64,
    pub drag_area: f64,
    /// Thrust factor for sideways input
    pub side_thrust: f64,
    /// Thrust factor for backward input
    pub back_thrust: f64,
    /// Rotation steps per degree of heading
    pub angle_scale: f64,
    pub charging_ms: u32,
    pub absorb_energy_per_ms: f64,
    pub boost_energy_per_ms: f64,
    pub run_acceleration: f64,
    pub boost_acceleration: f64,
    /// Upward share of an airborne boost
    pub boost_up_rate: f64,
    pub friction_coefficient: f64,
    /// Velocities below this are zeroed when no force acts on the axis
    pub creep_epsilon: f64,
    /// Height above rest at which the combatant still counts as standing
    pub grounded_margin: f64,
    pub sphere_radius: f64,
    /// Half lengths of the bounding cross used against walls
    pub cross_half_extents: Vector3,
    pub lock_on: LockOnConfig,
}

impl Default for RoboConfig {
    fn default() -> Self {
        Self {
            mass: 100.0,
            half_width: 0.25,
            height: 1.0,
            air_density: 1.293,
            drag_coefficient: 2.0,
            drag_area: 0.5,
            side_thrust: 0.8,
            back_thrust: 0.6,
            angle_scale: 3.0,
            charging_ms: 200,
            absorb_energy_per_ms: 0.001,
            boost_energy_per_ms: 0.0004,
            run_acceleration: 22.0,
            boost_acceleration: 15.0,
            boost_up_rate: 0.4,
            friction_coefficient: 0.55,
            creep_epsilon: 1e-3,
            grounded_margin: 0.01,
            sphere_radius: 1.0,
            cross_half_extents: Vector3::new(0.25, 1.0, 0.25),
            lock_on: LockOnConfig::default(),
        }
    }
}

impl RoboConfig {
    /// Half extents of the combatant's box model.
    pub fn half_extents(&self) -> Vector3 {
        Vector3::new(self.half_width, self.height / 2.0, self.half_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponState {
    #[default]
    Ready,
    Charging,
}

fn reverse_direction(a: f64) -> f64 {
    if a > 0.0 {
        -1.0
    } else if a < 0.0 {
        1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Robo {
    id: RoboId,
    model: Model,
    config: RoboConfig,
    force: Vector3,
    velocity: Vector3,
    delta_next_position: Vector3,
    angle_zx: f64,
    view: View,
    weapon_state: WeaponState,
    state_counter_ms: u32,
    is_locking_on: bool,
    sighting_ms: u32,
    energy: f64,
    hp: f64,
}

impl Robo {
    pub fn new(id: RoboId, model: Model, config: RoboConfig, view: ViewConfig) -> Self {
        Self {
            id,
            model,
            config,
            force: Vector3::ZERO,
            velocity: Vector3::ZERO,
            delta_next_position: Vector3::ZERO,
            angle_zx: 0.0,
            view: View::new(view),
            weapon_state: WeaponState::Ready,
            state_counter_ms: 0,
            is_locking_on: false,
            sighting_ms: 0,
            energy: 1.0,
            hp: 1.0,
        }
    }

    pub fn id(&self) -> RoboId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.model.name
    }

    pub fn config(&self) -> &RoboConfig {
        &self.config
    }

    /// Committed position (center of the model).
    pub fn center(&self) -> Vector3 {
        self.model.position
    }

    pub fn force(&self) -> Vector3 {
        self.force
    }

    pub fn set_force(&mut self, force: Vector3) {
        self.force = force;
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    pub fn delta_next_position(&self) -> Vector3 {
        self.delta_next_position
    }

    pub fn set_delta_next_position_value(&mut self, delta: Vector3) {
        self.delta_next_position = delta;
    }

    /// Force, velocity and pending delta as one value for collision passes.
    pub fn pending_move(&self) -> PendingMove {
        PendingMove::new(self.force, self.velocity, self.delta_next_position)
    }

    pub fn apply_pending_move(&mut self, pending: PendingMove) {
        self.force = pending.force;
        self.velocity = pending.velocity;
        self.delta_next_position = pending.delta;
    }

    pub fn angle_zx(&self) -> f64 {
        self.angle_zx
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn weapon_state(&self) -> WeaponState {
        self.weapon_state
    }

    pub fn is_locking_on(&self) -> bool {
        self.is_locking_on
    }

    pub fn sighting_ms(&self) -> u32 {
        self.sighting_ms
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    // ========================================================================
    // CONTROL
    // ========================================================================

    /// Face `angle` degrees in the z-x plane.
    pub fn set_heading(&mut self, angle: f64) {
        self.angle_zx = normalize_angle(angle);
        self.model.angle.y = self.angle_zx;
    }

    /// Turn by `step` input steps (`step / angle_scale` degrees).
    pub fn rotate_zx(&mut self, step: i32) {
        self.set_heading(self.angle_zx + step as f64 / self.config.angle_scale);
    }

    /// Thrust in the local frame (+z forward, +x left).
    pub fn run(&mut self, direction: Vector3) {
        self.add_force(direction, self.config.run_acceleration);
    }

    /// Boost along `direction`, spending energy. Without energy this only
    /// regenerates.
    pub fn boost(&mut self, direction: Vector3, dt_ms: u32) {
        if self.energy <= 0.0 {
            self.absorb_energy(dt_ms);
            return;
        }

        self.energy = (self.energy - self.config.boost_energy_per_ms * dt_ms as f64).max(0.0);

        let mut tuned = direction;
        let up_rate = self.config.boost_up_rate;
        if self.center().y > self.config.height / 2.0 && tuned.length() > 0.0 {
            tuned *= 1.0 - up_rate;
            tuned.y = up_rate;
        }
        if tuned.length() == 0.0 {
            tuned.y = 1.0;
        }

        self.add_force(tuned, self.config.boost_acceleration);
    }

    pub fn absorb_energy(&mut self, dt_ms: u32) {
        self.energy = (self.energy + self.config.absorb_energy_per_ms * dt_ms as f64).min(1.0);
    }

    fn add_force(&mut self, direction: Vector3, acceleration: f64) {
        let mut local = direction;
        local.x *= self.config.side_thrust;
        if local.z < 0.0 {
            local.z *= self.config.back_thrust;
        }

        let mut rotation = Matrix44::identity();
        rotation.rotate_zx(self.angle_zx);
        self.force += rotation.transform_direction(local) * (acceleration * self.config.mass);
    }

    /// Aim angles `(pitch, yaw, 0)`: view pitch with the combatant's heading.
    pub fn aim_angles(&self) -> Vector3 {
        normalize_angles(Vector3::new(self.view.pitch(), self.angle_zx, 0.0))
    }

    /// Ask the armoury for a projectile aimed along [`Robo::aim_angles`].
    ///
    /// Homing when the lock-on latch is set. Only a successful shot starts
    /// the weapon charging.
    pub fn fire_bullet(
        &mut self,
        armoury: &mut Armoury,
        opponent: Option<RoboId>,
        targets: &impl HomingTarget,
    ) -> bool {
        if self.weapon_state != WeaponState::Ready {
            return false;
        }

        let launch = Launch {
            owner: self.id,
            origin: self.center(),
            aim: self.aim_angles(),
            target: opponent,
            homing: self.is_locking_on,
        };
        let fired = armoury.fire(&launch, targets);
        if fired {
            self.weapon_state = WeaponState::Charging;
            self.state_counter_ms = 0;
        }
        fired
    }

    // ========================================================================
    // UPDATE
    // ========================================================================

    /// Lock-on, integration, weapon charge and view follow for one frame.
    pub fn update(&mut self, opponent_center: Option<Vector3>, dt_ms: u32, gravity: f64) {
        self.lock_on(opponent_center, dt_ms);
        self.set_delta_next_position(dt_ms, gravity);
        self.charge_weapon(dt_ms);
        let center = self.center();
        self.view.follow(center, self.angle_zx);
    }

    /// Integrate the force accumulator into velocity and the pending delta,
    /// then reset the accumulator to gravity.
    pub fn set_delta_next_position(&mut self, dt_ms: u32, gravity: f64) {
        let dt = dt_ms as f64 / 1e3;
        let c = &self.config;

        let epsilon = c.creep_epsilon;
        if self.force.x == 0.0 && self.velocity.x.abs() < epsilon {
            self.velocity.x = 0.0;
        }
        if self.force.z == 0.0 && self.velocity.z.abs() < epsilon {
            self.velocity.z = 0.0;
        }

        let drag = self.velocity * self.velocity.abs() * (c.air_density * c.drag_area * c.drag_coefficient / 2.0);

        let mut friction = Vector3::ZERO;
        if self.velocity.y == 0.0 && self.center().y <= c.height / 2.0 + c.grounded_margin {
            friction.x = reverse_direction(self.velocity.x);
            friction.z = reverse_direction(self.velocity.z);
            friction *= c.mass * c.friction_coefficient;
        }

        self.velocity += (self.force - drag + friction) * dt / c.mass;
        self.delta_next_position = self.velocity * dt;
        self.force = Vector3::new(0.0, -gravity * c.mass, 0.0);
    }

    pub fn charge_weapon(&mut self, dt_ms: u32) {
        if self.weapon_state == WeaponState::Ready {
            self.state_counter_ms = 0;
            return;
        }

        self.state_counter_ms = self.state_counter_ms.saturating_add(dt_ms);
        if self.state_counter_ms > self.config.charging_ms {
            self.weapon_state = WeaponState::Ready;
            self.state_counter_ms = 0;
            tracing::debug!(robo = self.id.0, "weapon charged");
        }
    }

    /// Accumulate sighting time while the opponent stays in the cone.
    /// Leaving the cone resets both the latch and the accumulator.
    pub fn lock_on(&mut self, opponent_center: Option<Vector3>, dt_ms: u32) {
        let sighting = opponent_center.is_some_and(|point| self.is_sighting(point));
        if !sighting {
            if self.is_locking_on {
                tracing::debug!(robo = self.id.0, "lock-on lost");
            }
            self.is_locking_on = false;
            self.sighting_ms = 0;
            return;
        }

        if self.is_locking_on {
            return;
        }

        self.sighting_ms = self.sighting_ms.saturating_add(dt_ms);
        if self.sighting_ms >= self.config.lock_on.complete_ms {
            self.is_locking_on = true;
            tracing::debug!(robo = self.id.0, sighting_ms = self.sighting_ms, "lock-on acquired");
        }
    }

    /// Progress toward the latch, `0..=1`.
    pub fn lock_on_rate(&self) -> f64 {
        let complete = self.config.lock_on.complete_ms.max(1) as f64;
        (self.sighting_ms as f64 / complete).clamp(0.0, 1.0)
    }

    /// Whether `point` lies inside the sighting cone around the aim direction.
    pub fn is_sighting(&self, point: Vector3) -> bool {
        let lock_on = &self.config.lock_on;
        let to_point = point - self.center();
        let depth = to_point.length();
        if depth < lock_on.min_depth || depth > lock_on.max_depth {
            return false;
        }

        let half_theta = lock_on.half_theta_at(depth).abs();
        let aim = self.aim_angles();

        let mut rotation = Matrix44::identity();
        rotation.rotate_zx(-aim.y);
        rotation.rotate_yz(-aim.x);
        let local = rotation.transform_direction(to_point);
        if local.z <= 0.0 {
            return false;
        }

        let theta_zx = local.x.atan2(local.z).to_degrees();
        let theta_yz = local.y.atan2(local.z).to_degrees();
        theta_zx.abs() < half_theta && theta_yz.abs() < half_theta
    }

    pub fn was_shot(&mut self, damage: f64) {
        self.hp = (self.hp - damage).max(0.0);
    }

    /// Apply the (collision-trimmed) pending delta.
    pub fn commit_next_position(&mut self) {
        self.model.position += self.delta_next_position;
    }

    /// Teleport without touching velocity or the pending delta.
    pub fn warp(&mut self, to: Vector3) {
        self.model.position = to;
    }

    /// Restore the spawn state at `position` facing `heading`.
    pub fn respawn(&mut self, position: Vector3, heading: f64) {
        let view = *self.view.config();
        *self = Self::new(self.id, self.model.clone(), self.config, view);
        self.warp(position);
        self.set_heading(heading);
    }

    // ========================================================================
    // VOLUMES
    // ========================================================================

    fn next_position(&self) -> Vector3 {
        self.center() + self.delta_next_position
    }

    /// Box at the prospective position.
    pub fn cuboid(&self) -> Cuboid {
        self.cuboid_with_delta(self.delta_next_position)
    }

    /// Box at the committed position moved by `delta`.
    pub fn cuboid_with_delta(&self, delta: Vector3) -> Cuboid {
        Cuboid::new(self.center() + delta, self.model.geometry().half_extents())
    }

    /// Contact sphere at the prospective position.
    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.next_position(), self.config.sphere_radius)
    }

    /// Contact sphere at the committed position.
    pub fn resting_sphere(&self) -> Sphere {
        Sphere::new(self.center(), self.config.sphere_radius)
    }

    /// Bounding cross (x, y, z segments) through the prospective position.
    pub fn segments(&self) -> [Segment; 3] {
        let c = self.next_position();
        let h = self.config.cross_half_extents;
        [
            Segment::new(c - Vector3::new(h.x, 0.0, 0.0), c + Vector3::new(h.x, 0.0, 0.0)),
            Segment::new(c - Vector3::new(0.0, h.y, 0.0), c + Vector3::new(0.0, h.y, 0.0)),
            Segment::new(c - Vector3::new(0.0, 0.0, h.z), c + Vector3::new(0.0, 0.0, h.z)),
        ]
    }

    /// Box around the last committed move, grown by the model radius.
    pub fn locus_cuboid(&self) -> Cuboid {
        let current = self.center();
        let previous = current - self.delta_next_position;
        Cuboid::spanning(previous, current, self.model.geometry().radius())
    }

    /// World-space triangles of the model at the committed position.
    pub fn triangles(&self) -> Vec<Triangle> {
        self.model.geometry().triangles_at(self.center())
    }

    pub fn draw(&self, projection: &Matrix44, sink: &mut dyn RenderSink) {
        self.model.draw(projection, sink);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::world::Geometry;

    const G: f64 = 9.8;

    fn robo_at(position: Vector3) -> Robo {
        let config = RoboConfig::default();
        let model = Model::new("robo", Arc::new(Geometry::cuboid(config.half_extents())));
        let mut robo = Robo::new(RoboId(0), model, config, ViewConfig::default());
        robo.warp(position);
        robo
    }

    #[test]
    fn test_gravity_only_frame() {
        let mut robo = robo_at(Vector3::new(0.0, 10.0, 0.0));
        robo.set_force(Vector3::new(0.0, -G * 100.0, 0.0));
        robo.set_delta_next_position(16, G);

        let delta = robo.delta_next_position();
        assert!((robo.velocity().y + G * 0.016).abs() < 1e-12);
        assert!((delta.y + G * 0.016 * 0.016).abs() < 1e-12);
        assert_eq!(robo.force(), Vector3::new(0.0, -G * 100.0, 0.0));
    }

    #[test]
    fn test_creep_is_zeroed_without_force() {
        let mut robo = robo_at(Vector3::new(0.0, 10.0, 0.0));
        robo.set_velocity(Vector3::new(5e-4, 0.0, -5e-4));
        robo.set_delta_next_position(16, 0.0);
        assert_eq!(robo.velocity().x, 0.0);
        assert_eq!(robo.velocity().z, 0.0);
    }

    #[test]
    fn test_drag_opposes_motion() {
        let mut robo = robo_at(Vector3::new(0.0, 10.0, 0.0));
        robo.set_velocity(Vector3::new(-10.0, 0.0, 10.0));
        robo.set_delta_next_position(16, 0.0);
        assert!(robo.velocity().x > -10.0);
        assert!(robo.velocity().z < 10.0);
    }

    #[test]
    fn test_friction_only_when_grounded() {
        let mut grounded = robo_at(Vector3::new(0.0, 0.5, 0.0));
        grounded.set_velocity(Vector3::new(0.0, 0.0, 1.0));
        grounded.set_delta_next_position(16, 0.0);

        let mut airborne = robo_at(Vector3::new(0.0, 3.0, 0.0));
        airborne.set_velocity(Vector3::new(0.0, 0.0, 1.0));
        airborne.set_delta_next_position(16, 0.0);

        assert!(grounded.velocity().z < airborne.velocity().z);
    }

    #[test]
    fn test_run_rotates_with_heading_and_damps() {
        let mut robo = robo_at(Vector3::ZERO);
        robo.set_heading(90.0);
        robo.run(Vector3::Z);
        let force = robo.force();
        assert!((force.x - 2200.0).abs() < 1e-9);
        assert!(force.z.abs() < 1e-9);

        let mut backing = robo_at(Vector3::ZERO);
        backing.run(Vector3::new(0.0, 0.0, -1.0));
        assert!((backing.force().z + 2200.0 * 0.6).abs() < 1e-9);

        let mut strafing = robo_at(Vector3::ZERO);
        strafing.run(Vector3::X);
        assert!((strafing.force().x - 2200.0 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_boost_spends_energy_and_lifts_when_airborne() {
        let mut robo = robo_at(Vector3::new(0.0, 5.0, 0.0));
        robo.boost(Vector3::Z, 100);
        assert!((robo.energy() - 0.96).abs() < 1e-12);
        let force = robo.force();
        assert!((force.y - 0.4 * 1500.0).abs() < 1e-9);
        assert!((force.z - 0.6 * 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_boost_without_direction_goes_up() {
        let mut robo = robo_at(Vector3::new(0.0, 0.5, 0.0));
        robo.boost(Vector3::ZERO, 16);
        assert!((robo.force().y - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_boost_without_energy_absorbs() {
        let mut robo = robo_at(Vector3::new(0.0, 0.5, 0.0));
        robo.boost(Vector3::Z, 10_000);
        assert_eq!(robo.energy(), 0.0);

        robo.set_force(Vector3::ZERO);
        robo.boost(Vector3::Z, 100);
        assert!((robo.energy() - 0.1).abs() < 1e-12);
        assert_eq!(robo.force(), Vector3::ZERO);
    }

    #[test]
    fn test_absorb_caps_at_full() {
        let mut robo = robo_at(Vector3::ZERO);
        robo.absorb_energy(10_000);
        assert_eq!(robo.energy(), 1.0);
    }

    #[test]
    fn test_rotate_zx_scales_and_wraps() {
        let mut robo = robo_at(Vector3::ZERO);
        robo.set_heading(179.0);
        robo.rotate_zx(6);
        assert!((robo.angle_zx() + 179.0).abs() < 1e-9);
    }

    #[test]
    fn test_weapon_charges_back() {
        let mut robo = robo_at(Vector3::ZERO);
        robo.weapon_state = WeaponState::Charging;
        robo.charge_weapon(150);
        assert_eq!(robo.weapon_state(), WeaponState::Charging);
        robo.charge_weapon(100);
        assert_eq!(robo.weapon_state(), WeaponState::Ready);
    }

    #[test]
    fn test_sighting_cone() {
        let robo = robo_at(Vector3::ZERO);
        assert!(robo.is_sighting(Vector3::new(0.0, 0.0, 20.0)));
        assert!(!robo.is_sighting(Vector3::new(0.0, 0.0, -20.0)));
        assert!(!robo.is_sighting(Vector3::new(0.0, 0.0, 2.0)));
        assert!(!robo.is_sighting(Vector3::new(0.0, 0.0, 120.0)));
        assert!(!robo.is_sighting(Vector3::new(5.0, 0.0, 20.0)));
    }

    #[test]
    fn test_sighting_follows_heading() {
        let mut robo = robo_at(Vector3::ZERO);
        robo.set_heading(90.0);
        assert!(robo.is_sighting(Vector3::new(20.0, 0.0, 0.0)));
        assert!(!robo.is_sighting(Vector3::new(0.0, 0.0, 20.0)));
    }

    #[test]
    fn test_lock_on_latches_and_resets() {
        let mut robo = robo_at(Vector3::ZERO);
        let ahead = Some(Vector3::new(0.0, 0.0, 20.0));

        for _ in 0..2 {
            robo.lock_on(ahead, 1000);
        }
        assert!(!robo.is_locking_on());
        assert!((robo.lock_on_rate() - 2.0 / 3.0).abs() < 1e-12);

        robo.lock_on(ahead, 1000);
        assert!(robo.is_locking_on());
        assert_eq!(robo.lock_on_rate(), 1.0);

        robo.lock_on(Some(Vector3::new(0.0, 0.0, -20.0)), 16);
        assert!(!robo.is_locking_on());
        assert_eq!(robo.sighting_ms(), 0);
    }

    #[test]
    fn test_was_shot_clamps() {
        let mut robo = robo_at(Vector3::ZERO);
        robo.was_shot(0.7);
        robo.was_shot(0.7);
        assert_eq!(robo.hp(), 0.0);
        assert!(!robo.is_alive());
    }

    #[test]
    fn test_volumes_use_pending_delta() {
        let mut robo = robo_at(Vector3::new(0.0, 1.0, 0.0));
        robo.set_delta_next_position_value(Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(robo.sphere().center, Vector3::new(0.0, 1.0, 1.0));
        assert_eq!(robo.resting_sphere().center, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(robo.cuboid().center(), Vector3::new(0.0, 1.0, 1.0));
        assert_eq!(robo.segments()[1].from, Vector3::new(0.0, 0.0, 1.0));

        robo.commit_next_position();
        assert_eq!(robo.center(), Vector3::new(0.0, 1.0, 1.0));
        let locus = robo.locus_cuboid();
        assert_eq!(locus.center(), Vector3::new(0.0, 1.0, 0.5));
        assert_eq!(robo.triangles().len(), 12);
    }
}
