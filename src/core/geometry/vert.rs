use crate::core::Color;
use glam::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub pos: Vec3,            // Position in model space
    pub normal: Vec3,         // Unit normal in model space
    pub color: Option<Color>, // Optional baked vertex color
}

impl Vertex {
    pub fn new(pos: Vec3, normal: Vec3) -> Self {
        Self {
            pos,
            normal,
            color: None,
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            normal: Vec3::Z,
            color: None,
        }
    }
}
