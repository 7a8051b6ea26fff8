use std::io;

use glam::{Affine3A, Vec3};
use log::{debug, warn};
use minifb::Window;

use crate::core::geometry::{Material, Mesh};
use crate::core::{Camera, Color, Entity, Light, LightRig, Scene};
use crate::error::OrreryError;
use crate::objects::Planet;
use crate::pipeline::{Buffer, Pipeline};
use crate::util::format_mat4;

/// What setup_geometry installs. Earlier revisions of the scene shipped a
/// lone spinning cube before the planet system existed; both remain
/// selectable presets.
#[derive(Clone, Debug)]
pub enum GeometryPreset {
    /// A 0.3-unit cube at the origin with normals baked to vertex colors.
    DemoCube,
    /// Central star plus the given planets.
    PlanetSystem(Vec<Planet>),
}

/// Everything a Viewport needs up front. Built explicitly in main and
/// passed in whole; there is no global scene state.
#[derive(Clone, Debug)]
pub struct ViewportConfig {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view, degrees
    pub fov: f32,
    pub light_rig: LightRig,
    pub geometry: GeometryPreset,
    /// Give the demo cube its spin. Without this no entity ever moves.
    pub animate: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov: 75.0,
            light_rig: LightRig::SinglePoint,
            geometry: GeometryPreset::PlanetSystem(default_planets()),
            animate: false,
        }
    }
}

/// The stock three-planet system: two bare rocky bodies and one ringed
/// gas giant.
pub fn default_planets() -> Vec<Planet> {
    vec![
        Planet::new(0x800505, false, 0.1, 0.55, 0.0).expect("stock planet params are valid"),
        Planet::new(0x00027C, false, 0.075, 1.1, 0.0).expect("stock planet params are valid"),
        Planet::new(0x037801, true, 0.15, 2.0, 0.0).expect("stock planet params are valid"),
    ]
}

/// Owns the camera, the scene graph, and the render pipeline, and answers
/// the host's two events: resize and tick. Construction runs camera,
/// lighting, and geometry setup once, in that order, then normalizes the
/// aspect invariant with an initial resize.
pub struct Viewport<B: Buffer> {
    pub camera: Camera,
    pub scene: Scene,
    pub pipeline: Pipeline<B>,
    config: ViewportConfig,
}

impl<B: Buffer> Viewport<B> {
    pub fn new(config: ViewportConfig) -> Result<Self, OrreryError> {
        if config.width == 0 || config.height == 0 {
            return Err(OrreryError::InvalidParameter(format!(
                "output surface must have nonzero dimensions, got {}x{}",
                config.width, config.height
            )));
        }

        let aspect = config.width as f32 / config.height as f32;
        let camera = Camera::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, config.fov, aspect);

        let mut viewport = Self {
            camera,
            scene: Scene::new(),
            pipeline: Pipeline::new(config.width, config.height),
            config,
        };

        viewport.setup_camera();
        viewport.setup_lighting();
        viewport.setup_geometry();

        let (width, height) = (viewport.config.width, viewport.config.height);
        viewport.on_resize(width, height);

        debug!(
            "{}",
            format_mat4("camera projection", &viewport.camera.projection_matrix())
        );
        debug!("{}", format_mat4("camera view", &viewport.camera.view_matrix()));

        Ok(viewport)
    }

    /// Resize hook. Leaves `camera.aspect == width / height` holding and
    /// the output buffers at exactly the delivered size; safe to call any
    /// number of times.
    pub fn on_resize(&mut self, width: usize, height: usize) {
        // Hosts can report a zero-sized surface mid-minimize; keep the
        // last good size instead of building degenerate buffers
        if width == 0 || height == 0 {
            warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.camera.update_aspect_ratio(width as f32, height as f32);
        self.pipeline.resize(width, height);
        debug!("viewport resized to {}x{}", width, height);
    }

    /// Per-frame hook: advance declared animation hooks by `delta`
    /// seconds, then draw the scene once. Nothing else mutates.
    pub fn on_tick(&mut self, delta: f32, window: Option<&mut Window>) -> io::Result<()> {
        self.scene.update(delta);
        self.pipeline.render_frame(&self.scene, &self.camera, window)
    }

    fn setup_camera(&mut self) {
        // Rest pose: pushed back along +Z, looking at the origin
        self.camera.position.z += 1.0;
    }

    fn setup_lighting(&mut self) {
        for light in self.config.light_rig.lights() {
            self.scene.add_light(light);
        }
    }

    fn setup_geometry(&mut self) {
        match self.config.geometry.clone() {
            GeometryPreset::DemoCube => {
                let mut mesh = Mesh::cube(0.3, Material::default());
                mesh.bake_normals_to_colors();

                let mut cube = Entity::new("demo cube", mesh, Affine3A::IDENTITY);
                if self.config.animate {
                    cube = cube.with_spin(Vec3::new(0.6, 1.0, 0.0));
                }
                self.scene.add_entity(cube);
            }
            GeometryPreset::PlanetSystem(planets) => {
                // Central star: an emissive body plus its own light
                self.scene.add_entity(Entity::new(
                    "star",
                    Mesh::sphere(0.1, 32, 32, Material::emissive(Color::STAR_YELLOW, 1.0)),
                    Affine3A::IDENTITY,
                ));
                self.scene
                    .add_light(Light::point(Vec3::ZERO, Color::STAR_YELLOW, 1.0, 4.0));

                for planet in &planets {
                    planet.add_to_viewport(self);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FrameBuffer;
    use glam::Vec3;

    fn planet_viewport() -> Viewport<FrameBuffer> {
        Viewport::new(ViewportConfig::default()).unwrap()
    }

    #[test]
    fn rejects_zero_sized_surfaces() {
        let config = ViewportConfig {
            width: 0,
            height: 600,
            ..ViewportConfig::default()
        };
        assert!(matches!(
            Viewport::<FrameBuffer>::new(config),
            Err(OrreryError::InvalidParameter(_))
        ));
    }

    #[test]
    fn construction_normalizes_the_aspect_invariant() {
        let viewport = planet_viewport();
        assert!((viewport.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(viewport.camera.position, Vec3::new(0.0, 0.0, 2.0));
        assert!((viewport.camera.near - 0.01).abs() < 1e-6);
        assert!((viewport.camera.far - 10.0).abs() < 1e-6);
    }

    #[test]
    fn resize_sequence_tracks_the_latest_size() {
        let mut viewport = planet_viewport();
        for (w, h) in [(400usize, 300usize), (1024, 768), (333, 777)] {
            viewport.on_resize(w, h);
            assert!((viewport.camera.aspect - w as f32 / h as f32).abs() < 1e-6);
            assert_eq!(viewport.pipeline.width, w);
            assert_eq!(viewport.pipeline.height, h);
        }
    }

    #[test]
    fn resize_is_idempotent() {
        let mut viewport = planet_viewport();
        viewport.on_resize(400, 300);
        let aspect = viewport.camera.aspect;
        viewport.on_resize(400, 300);
        assert_eq!(viewport.camera.aspect, aspect);
        assert_eq!(viewport.pipeline.width, 400);
    }

    #[test]
    fn resize_to_zero_keeps_the_last_good_size() {
        let mut viewport = planet_viewport();
        viewport.on_resize(400, 300);

        viewport.on_resize(0, 300);
        viewport.on_resize(400, 0);
        viewport.on_resize(0, 0);

        assert_eq!(viewport.pipeline.width, 400);
        assert_eq!(viewport.pipeline.height, 300);
        assert!((viewport.camera.aspect - 400.0 / 300.0).abs() < 1e-6);

        // Still renders at the surviving size
        viewport.on_tick(0.016, None).unwrap();
    }

    #[test]
    fn stock_system_has_star_three_bodies_and_one_ring() {
        let viewport = planet_viewport();

        let names: Vec<&str> = viewport
            .scene
            .entities
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "star",
                "planet body",
                "planet body",
                "planet body",
                "planet rings"
            ]
        );

        let positions: Vec<Vec3> = viewport.scene.entities.iter().map(|e| e.position()).collect();
        assert_eq!(positions[0], Vec3::ZERO);
        assert_eq!(positions[1], Vec3::new(0.55, 0.0, 0.0));
        assert_eq!(positions[2], Vec3::new(1.1, 0.0, 0.0));
        assert_eq!(positions[3], Vec3::new(2.0, 0.0, 0.0));
        // The ring sits exactly on its body
        assert_eq!(positions[4], Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn lighting_rig_and_star_light_populate_the_scene() {
        let viewport = planet_viewport();
        // SinglePoint rig (ambient + point) plus the star's own light
        assert_eq!(viewport.scene.lights.len(), 3);
    }

    #[test]
    fn tick_mutates_nothing_without_animation() {
        let mut viewport = planet_viewport();

        let camera_pos = viewport.camera.position;
        let entity_count = viewport.scene.entities.len();
        let light_count = viewport.scene.lights.len();
        let transforms: Vec<_> = viewport
            .scene
            .entities
            .iter()
            .map(|e| e.transform)
            .collect();

        for _ in 0..5 {
            viewport.on_tick(0.016, None).unwrap();
        }

        assert_eq!(viewport.camera.position, camera_pos);
        assert_eq!(viewport.scene.entities.len(), entity_count);
        assert_eq!(viewport.scene.lights.len(), light_count);
        for (entity, before) in viewport.scene.entities.iter().zip(transforms) {
            assert_eq!(entity.transform, before);
        }
    }

    #[test]
    fn animated_cube_spins_on_tick() {
        let config = ViewportConfig {
            geometry: GeometryPreset::DemoCube,
            animate: true,
            ..ViewportConfig::default()
        };
        let mut viewport: Viewport<FrameBuffer> = Viewport::new(config).unwrap();

        let before = viewport.scene.entities[0].transform;
        viewport.on_tick(0.1, None).unwrap();
        assert_ne!(viewport.scene.entities[0].transform, before);
    }

    #[test]
    fn end_to_end_resize_from_800x600_to_400x300() {
        let mut viewport = planet_viewport();
        assert!((viewport.camera.aspect - 800.0 / 600.0).abs() < 1e-6);

        viewport.on_resize(400, 300);
        assert!((viewport.camera.aspect - 400.0 / 300.0).abs() < 1e-6);
        assert_eq!(viewport.pipeline.width, 400);
        assert_eq!(viewport.pipeline.height, 300);

        // Still renders after the resize
        viewport.on_tick(0.016, None).unwrap();
    }
}
