//! CPU-side instance batches.
//!
//! [`Batch`] implements [`DrawSurface`] by collecting circles and lines into
//! `#[repr(C)]` instance structs that are uploaded as-is to the vertex buffers.

use crate::frame::DrawSurface;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// One circle instance. Must match `CircleInstance` in the circle shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2, // center
        },
        wgpu::VertexAttribute {
            offset: 8,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32, // radius
        },
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x4, // color
        },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One line instance. Must match `LineInstance` in the line shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub color: [f32; 4],
    pub width: f32,
    pub _pad: [f32; 3],
}

impl LineInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2, // start
        },
        wgpu::VertexAttribute {
            offset: 8,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x2, // end
        },
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x4, // color
        },
        wgpu::VertexAttribute {
            offset: 32,
            shader_location: 3,
            format: wgpu::VertexFormat::Float32, // width
        },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Instances for one frame plus the clear color.
#[derive(Debug, Clone)]
pub struct Batch {
    size: (u32, u32),
    pub clear_color: Vec4,
    pub circles: Vec<CircleInstance>,
    pub lines: Vec<LineInstance>,
}

impl Batch {
    /// An empty batch for a surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            circles: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Reuse the allocations for the next frame.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.circles.clear();
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty() && self.lines.is_empty()
    }
}

impl DrawSurface for Batch {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self, color: Vec4) {
        self.clear_color = color;
        self.circles.clear();
        self.lines.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        self.circles.push(CircleInstance {
            center: center.to_array(),
            radius,
            _pad: 0.0,
            color: color.to_array(),
        });
    }

    fn stroke_line(&mut self, start: Vec2, end: Vec2, width: f32, color: Vec4) {
        self.lines.push(LineInstance {
            start: start.to_array(),
            end: end.to_array(),
            color: color.to_array(),
            width,
            _pad: [0.0; 3],
        });
    }
}
