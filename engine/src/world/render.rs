//! Render sink boundary
//!
//! The simulation never rasterizes anything. Drawing a model means
//! transforming its vertices to clip space and handing the result to a
//! [`RenderSink`] owned by the host.

use bytemuck::{Pod, Zeroable};

use crate::physics::{DVec4, Matrix44};

/// Homogeneous clip-space vertex, laid out for direct upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ClipVertex {
    pub position: [f32; 4],
}

static_assertions::assert_eq_size!(ClipVertex, [u8; 16]);

impl ClipVertex {
    pub fn from_clip(clip: DVec4) -> Self {
        Self {
            position: clip.as_vec4().to_array(),
        }
    }
}

/// One model's worth of transformed geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub label: String,
    pub vertices: Vec<ClipVertex>,
    pub indices: Vec<u32>,
}

impl DrawBatch {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex bytes, ready for a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Accepts transformed geometry from the simulation.
pub trait RenderSink {
    fn submit(&mut self, projection: &Matrix44, batch: DrawBatch);
}

/// Sink that keeps every batch of the current frame.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    batches: Vec<DrawBatch>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    pub fn clear(&mut self) {
        self.batches.clear();
    }

    pub fn triangle_count(&self) -> usize {
        self.batches.iter().map(DrawBatch::triangle_count).sum()
    }
}

impl RenderSink for FrameRecorder {
    fn submit(&mut self, _projection: &Matrix44, batch: DrawBatch) {
        self.batches.push(batch);
    }
}
