//! Static terrain: the ground plane and walls
//!
//! Both expose world-space triangles for projectile and segment sweeps.
//! The ground additionally has a cuboid (a large slab under y = 0) that
//! combatants slide against. Walls cache their world triangles and rebuild
//! the cache only when moved.

use std::sync::Arc;

use crate::physics::{Cuboid, Matrix44, Triangle, TriangleSource, Vector3};

use super::model::{Geometry, Model};
use super::render::{ClipVertex, DrawBatch, RenderSink};

/// Flat square ground at y = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    half_extent: f64,
    triangles: Vec<Triangle>,
    cuboid: Cuboid,
}

impl Ground {
    /// Ground spanning `[-half_extent, half_extent]` on x and z. The slab
    /// below it is as deep as it is wide.
    pub fn new(half_extent: f64) -> Self {
        let h = half_extent;
        let corners = [
            Vector3::new(-h, 0.0, -h),
            Vector3::new(h, 0.0, -h),
            Vector3::new(h, 0.0, h),
            Vector3::new(-h, 0.0, h),
        ];
        let triangles = vec![
            Triangle::new(corners[0], corners[2], corners[1]),
            Triangle::new(corners[0], corners[3], corners[2]),
        ];
        let cuboid = Cuboid::new(Vector3::new(0.0, -h, 0.0), Vector3::splat(h));

        Self {
            half_extent,
            triangles,
            cuboid,
        }
    }

    pub fn cuboid(&self) -> &Cuboid {
        &self.cuboid
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    pub fn draw(&self, projection: &Matrix44, sink: &mut dyn RenderSink) {
        let vertices = self
            .triangles
            .iter()
            .flat_map(|t| [t.p0, t.p1, t.p2])
            .map(|p| ClipVertex::from_clip(projection.multiply(p.extend(1.0))))
            .collect();
        let indices = (0..self.triangles.len() as u32 * 3).collect();

        sink.submit(
            projection,
            DrawBatch {
                label: "ground".to_string(),
                vertices,
                indices,
            },
        );
    }
}

impl TriangleSource for Ground {
    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

/// Static obstacle built from a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    model: Model,
    triangles: Vec<Triangle>,
}

impl Wall {
    pub fn new(model: Model) -> Self {
        let triangles = model.geometry().triangles_at(model.position);
        Self { model, triangles }
    }

    /// Wall of the given half extents, standing alone.
    pub fn with_extents(name: impl Into<String>, half_extents: Vector3) -> Self {
        Self::new(Model::new(name, Arc::new(Geometry::cuboid(half_extents))))
    }

    /// Move the wall and rebuild its world triangles.
    pub fn warp(&mut self, position: Vector3) {
        self.model.position = position;
        self.triangles = self.model.geometry().triangles_at(position);
    }

    pub fn position(&self) -> Vector3 {
        self.model.position
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn draw(&self, projection: &Matrix44, sink: &mut dyn RenderSink) {
        self.model.draw(projection, sink);
    }
}

impl TriangleSource for Wall {
    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Segment;

    #[test]
    fn test_ground_catches_falling_segment() {
        let ground = Ground::new(100.0);
        let segment = Segment::new(Vector3::new(3.0, 1.0, -7.0), Vector3::new(3.0, -1.0, -7.0));
        let hit = segment.first_hit(&ground);
        assert!(hit.is_some_and(|p| (p - Vector3::new(3.0, 0.0, -7.0)).length() < 1e-9));
    }

    #[test]
    fn test_ground_cuboid_top_is_zero() {
        let ground = Ground::new(100.0);
        let standing = Cuboid::new(Vector3::new(0.0, 0.5, 0.0), Vector3::new(0.25, 0.5, 0.25));
        let sinking = Cuboid::new(Vector3::new(0.0, 0.49, 0.0), Vector3::new(0.25, 0.5, 0.25));
        assert!(!standing.does_intersect(ground.cuboid()));
        assert!(sinking.does_intersect(ground.cuboid()));
    }

    #[test]
    fn test_wall_triangles_follow_warp() {
        let mut wall = Wall::with_extents("wall", Vector3::new(2.0, 1.2, 0.1));
        assert_eq!(wall.triangles().len(), 12);

        wall.warp(Vector3::new(0.0, 1.2, -15.0));
        let segment = Segment::new(Vector3::new(0.0, 1.0, -14.0), Vector3::new(0.0, 1.0, -16.0));
        let hit = segment.first_hit(&wall);
        assert!(hit.is_some_and(|p| (p.z + 15.1).abs() < 1e-9));
    }
}
