use std::fmt::{Display, Formatter};

use crate::core::Color;

/// Emissive surface description: the mesh glows with `base_color` at
/// `emissive_intensity` and still picks up diffuse light on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: Color,
    pub emissive_intensity: f32,

    // Shadow participation flags. Stored for every mesh; the software
    // rasterizer does not render shadow maps yet.
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Material {
    pub fn emissive(base_color: Color, emissive_intensity: f32) -> Self {
        Self {
            base_color,
            emissive_intensity,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn with_shadows(mut self) -> Self {
        self.cast_shadow = true;
        self.receive_shadow = true;
        self
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Material base: #{:06X}, emissive: {:.2}",
            self.base_color.to_u32(),
            self.emissive_intensity
        )
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::emissive(Color::WHITE, 0.0)
    }
}
