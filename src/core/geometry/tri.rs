use super::Vertex;
use glam::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct Tri {
    /// Indices into the mesh's vertex buffer
    pub vertices: [usize; 3],
}

impl Tri {
    pub fn new(vertices: [usize; 3]) -> Self {
        Self { vertices }
    }

    /// Face normal from the winding order (counter-clockwise front faces).
    pub fn face_normal(&self, vert_buf: &[Vertex]) -> Vec3 {
        let v0 = vert_buf[self.vertices[0]].pos;
        let v1 = vert_buf[self.vertices[1]].pos;
        let v2 = vert_buf[self.vertices[2]].pos;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        edge1.cross(edge2).normalize_or_zero()
    }

    pub fn centroid(&self, vert_buf: &[Vertex]) -> Vec3 {
        let v0 = vert_buf[self.vertices[0]].pos;
        let v1 = vert_buf[self.vertices[1]].pos;
        let v2 = vert_buf[self.vertices[2]].pos;
        (v0 + v1 + v2) / 3.0
    }
}
