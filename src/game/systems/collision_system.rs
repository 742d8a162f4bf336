//! Collision system - combatant contact and projectile hits.
//!
//! Wraps the slide primitives from [`crate::physics::collision`] into the
//! arena's fixed passes. A combatant is resolved against the ground, then
//! the opponent, then each wall, and every pass sees the pending move the
//! previous one left behind. Nothing here commits a position.

use crate::game::config::ContactShape;
use crate::game::robo::Robo;
use crate::physics::{GROUND_AXIS_ORDER, Vector3, slide_by_cuboid, slide_by_segments, slide_by_sphere};
use crate::world::{Ground, Wall};

use super::armoury::Armoury;

/// Stateless collision passes.
pub struct CollisionSystem;

impl CollisionSystem {
    /// Run every contact pass for `robo` in order: ground, opponent, walls.
    pub fn resolve(robo: &mut Robo, opponent: &Robo, ground: &Ground, walls: &[Wall], shape: ContactShape) {
        Self::slide_against_ground(robo, ground);
        Self::slide_against_robo(robo, opponent, shape);
        for wall in walls {
            Self::slide_against_wall(robo, wall);
        }
    }

    /// Axis slide (y, z, x) against the ground slab.
    ///
    /// Returns `true` if any axis was zeroed.
    pub fn slide_against_ground(robo: &mut Robo, ground: &Ground) -> bool {
        let mut pending = robo.pending_move();
        let zeroed = slide_by_cuboid(
            &mut pending,
            |delta| robo.cuboid_with_delta(delta),
            ground.cuboid(),
            &GROUND_AXIS_ORDER,
        );
        robo.apply_pending_move(pending);
        !zeroed.is_empty()
    }

    /// Keep `robo` out of `opponent`'s prospective volume.
    pub fn slide_against_robo(robo: &mut Robo, opponent: &Robo, shape: ContactShape) -> bool {
        let mut pending = robo.pending_move();
        let changed = match shape {
            ContactShape::Sphere => slide_by_sphere(&mut pending, &robo.resting_sphere(), &opponent.sphere()),
            ContactShape::Cuboid => !slide_by_cuboid(
                &mut pending,
                |delta| robo.cuboid_with_delta(delta),
                &opponent.cuboid(),
                &GROUND_AXIS_ORDER,
            )
            .is_empty(),
        };
        robo.apply_pending_move(pending);
        changed
    }

    /// Sweep the bounding cross against the wall and slide off the hit.
    pub fn slide_against_wall(robo: &mut Robo, wall: &Wall) -> Option<Vector3> {
        let mut pending = robo.pending_move();
        let center = robo.center() + pending.delta;
        let hit = slide_by_segments(&mut pending, center, &robo.segments(), wall);
        robo.apply_pending_move(pending);
        hit
    }

    /// Projectiles against a combatant. Returns the number of hits.
    pub fn burn_robo(armoury: &mut Armoury, robo: &mut Robo) -> usize {
        armoury.make_collision_with_robo(robo)
    }

    /// Projectiles against the ground and every wall. Returns the number of
    /// projectiles stopped.
    pub fn burn_terrain(armoury: &mut Armoury, ground: &Ground, walls: &[Wall]) -> usize {
        let mut hits = armoury.make_collision_with_terrain(ground);
        for wall in walls {
            hits += armoury.make_collision_with_terrain(wall);
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::camera::ViewConfig;
    use crate::game::robo::RoboConfig;
    use crate::physics::RoboId;
    use crate::world::{Geometry, Model};

    fn robo(id: usize, position: Vector3) -> Robo {
        let config = RoboConfig::default();
        let model = Model::new("robo", Arc::new(Geometry::cuboid(config.half_extents())));
        let mut robo = Robo::new(RoboId(id), model, config, ViewConfig::default());
        robo.warp(position);
        robo
    }

    #[test]
    fn test_ground_stops_fall() {
        let ground = Ground::new(100.0);
        let mut robo = robo(0, Vector3::new(0.0, 0.52, 0.0));
        robo.set_velocity(Vector3::new(1.0, -3.0, 0.0));
        robo.set_delta_next_position_value(Vector3::new(0.016, -0.048, 0.0));

        assert!(CollisionSystem::slide_against_ground(&mut robo, &ground));
        assert_eq!(robo.delta_next_position().y, 0.0);
        assert_eq!(robo.velocity().y, 0.0);
        assert_eq!(robo.delta_next_position().x, 0.016);
        assert_eq!(robo.velocity().x, 1.0);
    }

    #[test]
    fn test_ground_leaves_airborne_move() {
        let ground = Ground::new(100.0);
        let mut robo = robo(0, Vector3::new(0.0, 5.0, 0.0));
        robo.set_delta_next_position_value(Vector3::new(0.0, -0.1, 0.0));
        assert!(!CollisionSystem::slide_against_ground(&mut robo, &ground));
        assert_eq!(robo.delta_next_position().y, -0.1);
    }

    #[test]
    fn test_sphere_contact_removes_approach() {
        let mut mover = robo(0, Vector3::new(0.0, 0.5, 0.0));
        let opponent = robo(1, Vector3::new(0.0, 0.5, 2.05));
        mover.set_velocity(Vector3::new(1.0, 0.0, 5.0));
        mover.set_delta_next_position_value(Vector3::new(0.016, 0.0, 0.08));

        assert!(CollisionSystem::slide_against_robo(&mut mover, &opponent, ContactShape::Sphere));
        assert!(mover.delta_next_position().z.abs() < 1e-12);
        assert!(mover.velocity().z.abs() < 1e-12);
        assert!((mover.delta_next_position().x - 0.016).abs() < 1e-12);
    }

    #[test]
    fn test_cuboid_contact_zeroes_axis() {
        let mut mover = robo(0, Vector3::new(0.0, 0.5, 0.0));
        let opponent = robo(1, Vector3::new(0.0, 0.5, 0.55));
        mover.set_velocity(Vector3::new(0.0, 0.0, 5.0));
        mover.set_delta_next_position_value(Vector3::new(0.0, 0.0, 0.08));

        assert!(CollisionSystem::slide_against_robo(&mut mover, &opponent, ContactShape::Cuboid));
        assert_eq!(mover.delta_next_position().z, 0.0);
        assert_eq!(mover.velocity().z, 0.0);
    }

    #[test]
    fn test_wall_slide_keeps_retreat() {
        let mut wall = Wall::with_extents("wall", Vector3::new(2.0, 1.2, 0.1));
        wall.warp(Vector3::new(0.0, 1.2, -15.0));

        let mut mover = robo(0, Vector3::new(0.0, 0.5, -14.7));
        mover.set_velocity(Vector3::new(0.0, 0.0, -3.0));
        mover.set_delta_next_position_value(Vector3::new(0.0, 0.0, -0.05));
        assert!(CollisionSystem::slide_against_wall(&mut mover, &wall).is_some());
        assert!(mover.delta_next_position().z.abs() < 1e-12);
        assert!(mover.velocity().z.abs() < 1e-12);

        let mut leaving = robo(0, Vector3::new(0.0, 0.5, -14.7));
        leaving.set_delta_next_position_value(Vector3::new(0.0, 0.0, 0.05));
        leaving.set_velocity(Vector3::new(0.0, 0.0, 3.0));
        CollisionSystem::slide_against_wall(&mut leaving, &wall);
        assert_eq!(leaving.delta_next_position().z, 0.05);
    }
}
