use crate::core::Color;
use glam::{Vec2, Vec4};

pub mod buffer;
pub mod pipeline;
pub mod rasterizer;

pub use buffer::{Buffer, FrameBuffer, TermBuffer};
pub use pipeline::Pipeline;
pub use rasterizer::Rasterizer;

/// One triangle, transformed to clip space and shaded, ready for the
/// rasterizer.
#[derive(Clone, Debug)]
pub struct ProcessedGeometry {
    pub vertices: [ClipVertex; 3],
}

#[derive(Clone, Copy, Debug)]
pub struct ClipVertex {
    pub position: Vec4,
    pub color: Color,
}

#[derive(Clone)]
pub struct Fragment {
    pub screen_pos: Vec2,
    pub depth: f32,
    pub color: Color,
}

impl Default for Fragment {
    fn default() -> Self {
        Self {
            screen_pos: Vec2::ZERO,
            depth: f32::INFINITY,
            color: Color::WHITE,
        }
    }
}
