//! Model and geometry provider
//!
//! A [`Geometry`] is a local-space vertex/index buffer shared by every
//! instance created from the same prototype. A [`Model`] places one
//! instance in the world (position, angle, scale) and knows how to hand
//! itself to a [`RenderSink`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::physics::{Matrix44, Triangle, Vector3};

use super::render::{ClipVertex, DrawBatch, RenderSink};

/// Indexed triangle mesh in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vector3>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Axis-aligned box centered on the origin: 8 vertices, 12 triangles,
    /// outward winding.
    pub fn cuboid(half_extents: Vector3) -> Self {
        let h = half_extents;
        let vertices = vec![
            Vector3::new(-h.x, -h.y, -h.z),
            Vector3::new(h.x, -h.y, -h.z),
            Vector3::new(h.x, h.y, -h.z),
            Vector3::new(-h.x, h.y, -h.z),
            Vector3::new(-h.x, -h.y, h.z),
            Vector3::new(h.x, -h.y, h.z),
            Vector3::new(h.x, h.y, h.z),
            Vector3::new(-h.x, h.y, h.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -z
            4, 5, 6, 4, 6, 7, // +z
            0, 1, 5, 0, 5, 4, // -y
            3, 7, 6, 3, 6, 2, // +y
            0, 4, 7, 0, 7, 3, // -x
            1, 2, 6, 1, 6, 5, // +x
        ];
        Self { vertices, indices }
    }

    /// Largest absolute coordinate along each axis.
    pub fn half_extents(&self) -> Vector3 {
        self.vertices
            .iter()
            .fold(Vector3::ZERO, |acc, v| acc.max(v.abs()))
    }

    /// Distance from the origin to the farthest vertex.
    pub fn radius(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0, f64::max)
    }

    /// Triangles of the mesh moved by `offset`, without rotation.
    /// Triangles with an out-of-range index are skipped.
    pub fn triangles_at(&self, offset: Vector3) -> Vec<Triangle> {
        let vertex = |index: u32| self.vertices.get(index as usize).map(|v| *v + offset);
        self.indices
            .chunks_exact(3)
            .filter_map(|tri| Some(Triangle::new(vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?)))
            .collect()
    }
}

/// One placed instance of a prototype geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub position: Vector3,
    /// `(pitch, yaw, _)` in degrees
    pub angle: Vector3,
    pub scale: f64,
    geometry: Arc<Geometry>,
}

impl Model {
    pub fn new(name: impl Into<String>, geometry: Arc<Geometry>) -> Self {
        Self {
            name: name.into(),
            position: Vector3::ZERO,
            angle: Vector3::ZERO,
            scale: 1.0,
            geometry,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Model space to world space: scale, rotate, then translate.
    pub fn world_matrix(&self) -> Matrix44 {
        let mut m = Matrix44::identity();
        m.scale(self.scale);
        m.rotate(self.angle);
        m.translate(self.position);
        m
    }

    /// Transform every vertex to clip space and submit the batch.
    pub fn draw(&self, projection: &Matrix44, sink: &mut dyn RenderSink) {
        let mut transform = self.world_matrix();
        transform.dot(projection);

        let vertices = self
            .geometry
            .vertices
            .iter()
            .map(|v| ClipVertex::from_clip(transform.multiply(v.extend(1.0))))
            .collect();

        sink.submit(
            projection,
            DrawBatch {
                label: self.name.clone(),
                vertices,
                indices: self.geometry.indices.clone(),
            },
        );
    }
}

/// Prototype registry. Instances are created from a prototype by name.
#[derive(Debug, Clone, Default)]
pub struct ModelDatabase {
    prototypes: HashMap<String, Arc<Geometry>>,
}

impl ModelDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, prototype: impl Into<String>, geometry: Geometry) {
        self.prototypes.insert(prototype.into(), Arc::new(geometry));
    }

    pub fn contains(&self, prototype: &str) -> bool {
        self.prototypes.contains_key(prototype)
    }

    /// New instance named `name` sharing the prototype's geometry.
    pub fn create(&self, name: impl Into<String>, prototype: &str) -> Option<Model> {
        self.prototypes
            .get(prototype)
            .map(|geometry| Model::new(name, Arc::clone(geometry)))
    }
}
