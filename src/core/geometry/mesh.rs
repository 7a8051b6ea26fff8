use super::{Material, Tri, Vertex};
use crate::core::Color;
use glam::Vec3;
use std::f32::consts::PI;

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>, // Vertex buffer
    pub tris: Vec<Tri>,        // Triangles
    pub material: Material,
}

impl Mesh {
    pub fn new(material: Material) -> Self {
        Self {
            vertices: Vec::new(),
            tris: Vec::new(),
            material,
        }
    }

    /// UV sphere centered on the origin. `sectors` is the slice count
    /// around Y, `stacks` the ring count pole to pole.
    pub fn sphere(radius: f32, sectors: usize, stacks: usize, material: Material) -> Self {
        let mut mesh = Mesh::new(material);

        for stack in 0..=stacks {
            let phi = PI * stack as f32 / stacks as f32;
            let y = phi.cos();
            let ring_radius = phi.sin();

            for sector in 0..=sectors {
                let theta = 2.0 * PI * sector as f32 / sectors as f32;
                let normal = Vec3::new(
                    ring_radius * theta.cos(),
                    y,
                    ring_radius * theta.sin(),
                );
                mesh.vertices.push(Vertex::new(normal * radius, normal));
            }
        }

        // Two triangles per quad, skipping the degenerate ones at the poles
        let stride = sectors + 1;
        for stack in 0..stacks {
            for sector in 0..sectors {
                let a = stack * stride + sector;
                let b = a + stride;

                if stack != 0 {
                    mesh.tris.push(Tri::new([a, a + 1, b]));
                }
                if stack != stacks - 1 {
                    mesh.tris.push(Tri::new([a + 1, b + 1, b]));
                }
            }
        }

        mesh
    }

    /// Flat annulus in the XY plane, normal +Z, from `inner_radius` out
    /// to `outer_radius`.
    pub fn ring(inner_radius: f32, outer_radius: f32, segments: usize, material: Material) -> Self {
        let mut mesh = Mesh::new(material);

        for segment in 0..=segments {
            let theta = 2.0 * PI * segment as f32 / segments as f32;
            let dir = Vec3::new(theta.cos(), theta.sin(), 0.0);
            mesh.vertices.push(Vertex::new(dir * inner_radius, Vec3::Z));
            mesh.vertices.push(Vertex::new(dir * outer_radius, Vec3::Z));
        }

        for segment in 0..segments {
            let i = segment * 2;
            // inner i, outer i+1, inner i+2, outer i+3
            mesh.tris.push(Tri::new([i, i + 1, i + 2]));
            mesh.tris.push(Tri::new([i + 1, i + 3, i + 2]));
        }

        mesh
    }

    /// Axis-aligned cube centered on the origin, `size` on each edge.
    /// Vertices are duplicated per face so normals stay flat.
    pub fn cube(size: f32, material: Material) -> Self {
        let mut mesh = Mesh::new(material);
        let h = size / 2.0;

        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        ];

        for (normal, right, up) in faces {
            let base = mesh.vertices.len();
            for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let pos = (normal + right * u + up * v) * h;
                mesh.vertices.push(Vertex::new(pos, normal));
            }
            mesh.tris.push(Tri::new([base, base + 1, base + 2]));
            mesh.tris.push(Tri::new([base, base + 2, base + 3]));
        }

        mesh
    }

    /// Map each vertex normal into a vertex color. Gives the cube demo
    /// its normal-visualization look without a texture system.
    pub fn bake_normals_to_colors(&mut self) {
        for vertex in &mut self.vertices {
            let n = vertex.normal * 0.5 + Vec3::splat(0.5);
            vertex.color = Some(Color::new(n.x, n.y, n.z));
        }
    }
}
