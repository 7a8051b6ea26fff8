use glam::{Mat4, Vec3};

pub struct Camera {
    /// World-space position of the camera
    pub position: Vec3,
    /// The point the camera looks at
    pub target: Vec3,
    /// The up vector of the camera
    pub up: Vec3,
    /// Vertical field of view, in degrees
    pub fov: f32,
    /// Output width / output height
    pub aspect: f32,
    /// The near plane, anything closer than this will not be rendered
    pub near: f32,
    /// The far plane, anything beyond this will not be rendered
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, fov: f32, aspect: f32) -> Self {
        Camera {
            position,
            target,
            up: Vec3::Y,
            fov,
            aspect,
            near: 0.01,
            far: 10.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Recompute the aspect ratio for a new output size. Called from the
    /// resize handler so the invariant `aspect == width / height` holds
    /// whenever a frame is drawn.
    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, 75.0, 800.0 / 600.0)
    }
}
