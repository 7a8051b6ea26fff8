use std::{cell::RefCell, io};

use glam::{Mat4, Vec4};
use minifb::Window;

use crate::core::{Camera, FlatShading, LightingModel, Scene};

use super::{Buffer, ClipVertex, Fragment, ProcessedGeometry, Rasterizer};

/// A software rendering pipeline that turns a scene/camera pair into one
/// frame on an output buffer.
///
/// Per frame:
/// 1. Clear the back buffer
/// 2. Transform, cull, and shade triangles into clip space
/// 3. Rasterize to fragments
/// 4. Depth-test fragments into the back buffer
/// 5. Present and swap
pub struct Pipeline<B: Buffer> {
    pub width: usize,  // Output width in pixels
    pub height: usize, // Output height in pixels
    front_buffer: RefCell<B>,
    back_buffer: RefCell<B>,
    geometry: RefCell<Vec<ProcessedGeometry>>,
    rasterizer: RefCell<Rasterizer>,
    fragments: RefCell<Vec<Fragment>>,
}

impl<B: Buffer> Pipeline<B> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            front_buffer: RefCell::new(B::new(width, height)),
            back_buffer: RefCell::new(B::new(width, height)),
            geometry: RefCell::new(Vec::with_capacity(1024)),
            rasterizer: RefCell::new(Rasterizer::new(width, height)),
            fragments: RefCell::new(Vec::with_capacity(1024)),
        }
    }

    /// Resize the output surface. Both buffers and the rasterizer are
    /// rebuilt at the new dimensions; the next frame draws at full size.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        *self.front_buffer.borrow_mut() = B::new(width, height);
        *self.back_buffer.borrow_mut() = B::new(width, height);
        *self.rasterizer.borrow_mut() = Rasterizer::new(width, height);
    }

    /// Draw one frame of `scene` from `camera`. Pass the window for the
    /// minifb target; `None` presents through the buffer's own path
    /// (terminal output, or a no-op when headless).
    pub fn render_frame(
        &self,
        scene: &Scene,
        camera: &Camera,
        window: Option<&mut Window>,
    ) -> io::Result<()> {
        self.back_buffer.borrow_mut().clear();

        self.process_geometry(scene, camera);
        self.rasterize();
        self.process_fragments(&self.fragments.borrow());

        self.swap_buffers();

        if let Some(window) = window {
            self.front_buffer.borrow().present_window(window)?;
        } else {
            self.front_buffer.borrow().present()?;
        }

        Ok(())
    }

    /// Transform scene triangles to clip space, cull what cannot be seen,
    /// and flat-shade the rest.
    fn process_geometry(&self, scene: &Scene, camera: &Camera) {
        let view_matrix = camera.view_matrix();
        let projection_matrix = camera.projection_matrix();
        let shader = FlatShading;

        let mut geometry = self.geometry.borrow_mut();
        geometry.clear();

        for entity in &scene.entities {
            let model_matrix = Mat4::from(entity.transform);
            let mvp_matrix = projection_matrix * view_matrix * model_matrix;
            let normal_matrix = model_matrix.inverse().transpose();

            for tri in &entity.mesh.tris {
                let world_normal = normal_matrix
                    .transform_vector3(tri.face_normal(&entity.mesh.vertices))
                    .normalize_or_zero();
                let world_centroid =
                    model_matrix.transform_point3(tri.centroid(&entity.mesh.vertices));

                // Backface culling against the camera position
                if world_normal.dot(world_centroid - camera.position) >= 0.0 {
                    continue;
                }

                let shaded =
                    shader.shade(world_centroid, world_normal, &scene.lights, &entity.mesh.material);

                let mut clip_verts = [ClipVertex {
                    position: Vec4::ZERO,
                    color: shaded,
                }; 3];
                for (slot, index) in clip_verts.iter_mut().zip(tri.vertices) {
                    let vertex = &entity.mesh.vertices[index];
                    slot.position = mvp_matrix * Vec4::from((vertex.pos, 1.0));
                    // Baked vertex colors (the normal-material cube) skip
                    // the lighting model entirely
                    if let Some(baked) = vertex.color {
                        slot.color = baked;
                    }
                }

                if cull_clip_triangle(&clip_verts) {
                    continue;
                }

                geometry.push(ProcessedGeometry {
                    vertices: clip_verts,
                });
            }
        }
    }

    fn rasterize(&self) {
        self.rasterizer
            .borrow()
            .rasterize(&self.geometry.borrow(), &mut self.fragments.borrow_mut());
    }

    fn process_fragments(&self, fragments: &[Fragment]) {
        let mut buffer = self.back_buffer.borrow_mut();
        for fragment in fragments {
            let pixel = B::create_pixel(fragment.color);
            let pos = (
                fragment.screen_pos.x as usize,
                fragment.screen_pos.y as usize,
            );
            buffer.set_pixel(pos, &fragment.depth, pixel);
        }
    }

    fn swap_buffers(&self) {
        std::mem::swap(
            &mut *self.front_buffer.borrow_mut(),
            &mut *self.back_buffer.borrow_mut(),
        );
    }

    /// Count of triangles that survived culling in the last frame.
    pub fn processed_triangles(&self) -> usize {
        self.geometry.borrow().len()
    }
}

/// Whole-triangle rejection: anything crossing the w = 0 plane, or lying
/// entirely beyond one frustum side, is dropped rather than clipped. Scene
/// content lives well inside the frustum, so per-plane clipping is not
/// worth its weight here.
fn cull_clip_triangle(vertices: &[ClipVertex; 3]) -> bool {
    if vertices.iter().any(|v| v.position.w <= 0.0) {
        return true;
    }

    let all_outside = |f: fn(&Vec4) -> bool| vertices.iter().all(|v| f(&v.position));
    all_outside(|p| p.x < -p.w)
        || all_outside(|p| p.x > p.w)
        || all_outside(|p| p.y < -p.w)
        || all_outside(|p| p.y > p.w)
        || all_outside(|p| p.z < -p.w)
        || all_outside(|p| p.z > p.w)
}
