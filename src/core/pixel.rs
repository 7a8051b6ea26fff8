use crate::core::Color;

/// One terminal character cell.
#[derive(Clone, Copy, Debug)]
pub struct Pixel {
    pub ch: char,
    pub color: Color,
}

impl Pixel {
    pub fn new(ch: char, color: Color) -> Self {
        Pixel { ch, color }
    }

    pub fn full(color: Color) -> Self {
        Pixel::new('█', color)
    }

    pub fn blank() -> Self {
        Pixel::new(' ', Color::BLACK)
    }

    pub fn reset(&mut self) {
        *self = Pixel::blank();
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Pixel::blank()
    }
}
