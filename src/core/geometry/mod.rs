mod mat;
mod mesh;
mod tri;
mod vert;

pub use mat::Material;
pub use mesh::Mesh;
pub use tri::Tri;
pub use vert::Vertex;
