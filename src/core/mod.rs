pub mod camera;
pub mod color;
pub mod geometry;
pub mod light;
pub mod pixel;
pub mod scene;

pub use camera::Camera;
pub use color::Color;
pub use light::{FlatShading, Light, LightRig, LightingModel};
pub use pixel::Pixel;
pub use scene::{Entity, Scene};
