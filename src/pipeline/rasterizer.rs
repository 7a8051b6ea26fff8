use crate::core::Color;
use crate::pipeline::{Fragment, ProcessedGeometry};
use glam::{Vec2, Vec3, Vec4};
use rayon::prelude::*;

pub struct Rasterizer {
    width: usize,
    height: usize,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Fill the fragment buffer in place from the processed triangles.
    pub fn rasterize(&self, geometry: &[ProcessedGeometry], frags: &mut Vec<Fragment>) {
        frags.clear();

        *frags = geometry
            .par_iter()
            .flat_map(|geo| self.rasterize_triangle(geo))
            .collect();
    }

    fn rasterize_triangle(&self, geo: &ProcessedGeometry) -> Vec<Fragment> {
        let screen_verts = self.project_to_screen(&[
            geo.vertices[0].position,
            geo.vertices[1].position,
            geo.vertices[2].position,
        ]);
        let colors = [
            geo.vertices[0].color,
            geo.vertices[1].color,
            geo.vertices[2].color,
        ];

        self.fill_barycentric(screen_verts, colors)
    }

    /// Perspective divide + viewport transform. Keeps NDC z around as the
    /// per-vertex depth.
    fn project_to_screen(&self, vertices: &[Vec4; 3]) -> [Vec3; 3] {
        let mut screen_verts = [Vec3::ZERO; 3];
        for i in 0..3 {
            let w = vertices[i].w;
            let ndc = vertices[i] / w;
            screen_verts[i] = Vec3::new(
                (ndc.x + 1.0) * 0.5 * self.width as f32,
                (1.0 - ndc.y) * 0.5 * self.height as f32,
                ndc.z,
            );
        }
        screen_verts
    }

    fn fill_barycentric(&self, screen_verts: [Vec3; 3], colors: [Color; 3]) -> Vec<Fragment> {
        let mut fragments = Vec::new();

        let (v0, v1, v2) = (
            screen_verts[0].truncate(),
            screen_verts[1].truncate(),
            screen_verts[2].truncate(),
        );

        // Bounding box, clamped to the screen
        let mut bbox_min = Vec2::new((self.width - 1) as f32, (self.height - 1) as f32);
        let mut bbox_max = Vec2::ZERO;
        for v in [v0, v1, v2] {
            bbox_min = bbox_min.min(v);
            bbox_max = bbox_max.max(v);
        }
        bbox_min = bbox_min.max(Vec2::ZERO);
        bbox_max = bbox_max.min(Vec2::new(
            (self.width - 1) as f32,
            (self.height - 1) as f32,
        ));
        if bbox_min.x > bbox_max.x || bbox_min.y > bbox_max.y {
            return fragments;
        }

        for y in bbox_min.y as i32..=bbox_max.y as i32 {
            for x in bbox_min.x as i32..=bbox_max.x as i32 {
                let p = Vec2::new(x as f32, y as f32);
                let Some((w0, w1, w2)) = barycentric(p, v0, v1, v2) else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = screen_verts[0].z * w0
                    + screen_verts[1].z * w1
                    + screen_verts[2].z * w2;
                let color = Color {
                    r: colors[0].r * w0 + colors[1].r * w1 + colors[2].r * w2,
                    g: colors[0].g * w0 + colors[1].g * w1 + colors[2].g * w2,
                    b: colors[0].b * w0 + colors[1].b * w1 + colors[2].b * w2,
                };

                fragments.push(Fragment {
                    screen_pos: p,
                    depth,
                    color,
                });
            }
        }

        fragments
    }
}

fn barycentric(p: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if denom.abs() < 1e-10 {
        // Degenerate triangle
        return None;
    }
    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;
    Some((w0, w1, w2))
}
