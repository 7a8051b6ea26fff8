use glam::{Affine3A, Vec3};

use crate::core::geometry::{Material, Mesh};
use crate::core::{Color, Entity};
use crate::error::OrreryError;
use crate::pipeline::Buffer;
use crate::viewport::Viewport;

const RING_INNER_SCALE: f32 = 1.1;
const RING_OUTER_SCALE: f32 = 1.5;
const BODY_EMISSIVE: f32 = 0.6;
const RING_EMISSIVE: f32 = 0.3;
const RING_TILT: f32 = 1.0; // radians about X
const BODY_TESSELLATION: usize = 64;
const RING_SEGMENTS: usize = 30;

/// A body somewhat resembling a planet. Pure value: construct it with
/// fixed parameters, then materialize it once into a viewport's scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub base_color: Color,
    pub has_rings: bool,
    pub body_radius: f32,
    pub orbit_radius: f32,
    pub orbit_offset: f32,
}

impl Planet {
    pub fn new(
        color: u32,
        has_rings: bool,
        body_radius: f32,
        orbit_radius: f32,
        orbit_offset: f32,
    ) -> Result<Self, OrreryError> {
        if body_radius <= 0.0 {
            return Err(OrreryError::InvalidParameter(format!(
                "planet body radius must be positive, got {body_radius}"
            )));
        }
        if orbit_radius <= 0.0 {
            return Err(OrreryError::InvalidParameter(format!(
                "planet orbit radius must be positive, got {orbit_radius}"
            )));
        }

        Ok(Self {
            base_color: Color::from_u32(color),
            has_rings,
            body_radius,
            orbit_radius,
            orbit_offset,
        })
    }

    /// Build the body mesh (and ring mesh, when flagged) and hand them to
    /// the viewport's scene graph at the orbital placement.
    pub fn add_to_viewport<B: Buffer>(&self, viewport: &mut Viewport<B>) {
        let placement = Affine3A::from_translation(self.placement());

        viewport
            .scene
            .add_entity(Entity::new("planet body", self.make_body(), placement));

        if self.has_rings {
            let tilted = placement * Affine3A::from_rotation_x(RING_TILT);
            viewport
                .scene
                .add_entity(Entity::new("planet rings", self.make_rings(), tilted));
        }
    }

    fn make_body(&self) -> Mesh {
        Mesh::sphere(
            self.body_radius,
            BODY_TESSELLATION,
            BODY_TESSELLATION,
            Material::emissive(self.base_color, BODY_EMISSIVE).with_shadows(),
        )
    }

    fn make_rings(&self) -> Mesh {
        Mesh::ring(
            self.body_radius * RING_INNER_SCALE,
            self.body_radius * RING_OUTER_SCALE,
            RING_SEGMENTS,
            Material::emissive(self.base_color, RING_EMISSIVE).with_shadows(),
        )
    }

    // TODO: fold orbit_offset into the placement as an angular offset
    // around the star; today it is accepted and stored but never moves
    // the body off the +X axis.
    fn placement(&self) -> Vec3 {
        Vec3::new(self.orbit_radius, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LightRig;
    use crate::pipeline::FrameBuffer;
    use crate::viewport::{GeometryPreset, ViewportConfig};

    fn empty_viewport() -> Viewport<FrameBuffer> {
        let config = ViewportConfig {
            geometry: GeometryPreset::PlanetSystem(Vec::new()),
            light_rig: LightRig::AmbientOnly,
            ..ViewportConfig::default()
        };
        Viewport::new(config).unwrap()
    }

    #[test]
    fn rejects_nonpositive_radii() {
        assert!(Planet::new(0xFFFFFF, false, 0.0, 1.0, 0.0).is_err());
        assert!(Planet::new(0xFFFFFF, false, -0.1, 1.0, 0.0).is_err());
        assert!(Planet::new(0xFFFFFF, false, 0.1, 0.0, 0.0).is_err());
        assert!(Planet::new(0xFFFFFF, false, 0.1, -2.0, 0.0).is_err());
    }

    #[test]
    fn body_lands_on_the_orbit_axis() {
        let mut viewport = empty_viewport();
        let before = viewport.scene.entities.len();

        let planet = Planet::new(0x800505, false, 0.1, 0.55, 0.0).unwrap();
        planet.add_to_viewport(&mut viewport);

        assert_eq!(viewport.scene.entities.len(), before + 1);
        let body = viewport.scene.entities.last().unwrap();
        assert_eq!(body.position(), Vec3::new(0.55, 0.0, 0.0));
    }

    #[test]
    fn orbit_offset_has_no_placement_effect() {
        // Pins the known incompleteness: the offset is stored, never applied.
        let without = Planet::new(0x00027C, false, 0.075, 1.1, 0.0).unwrap();
        let with = Planet::new(0x00027C, false, 0.075, 1.1, 2.5).unwrap();
        assert_eq!(without.placement(), with.placement());
    }

    #[test]
    fn ringed_planet_adds_two_entities_at_one_position() {
        let mut viewport = empty_viewport();
        let before = viewport.scene.entities.len();

        let planet = Planet::new(0x037801, true, 0.15, 2.0, 0.0).unwrap();
        planet.add_to_viewport(&mut viewport);

        assert_eq!(viewport.scene.entities.len(), before + 2);
        let body = &viewport.scene.entities[before];
        let rings = &viewport.scene.entities[before + 1];
        assert_eq!(body.position(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(rings.position(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn ring_radii_scale_from_the_body() {
        let planet = Planet::new(0x037801, true, 0.15, 2.0, 0.0).unwrap();
        let rings = planet.make_rings();

        let mut min = f32::INFINITY;
        let mut max: f32 = 0.0;
        for v in &rings.vertices {
            let r = v.pos.truncate().length(); // ring lies in its XY plane
            min = min.min(r);
            max = max.max(r);
        }
        assert!((min - 0.15 * 1.1).abs() < 1e-6);
        assert!((max - 0.15 * 1.5).abs() < 1e-6);
    }

    #[test]
    fn materials_carry_emissive_and_shadow_flags() {
        let planet = Planet::new(0x800505, true, 0.1, 0.55, 0.0).unwrap();

        let body = planet.make_body();
        assert_eq!(body.material.base_color, Color::from_u32(0x800505));
        assert!((body.material.emissive_intensity - 0.6).abs() < 1e-6);
        assert!(body.material.cast_shadow && body.material.receive_shadow);

        let rings = planet.make_rings();
        assert!((rings.material.emissive_intensity - 0.3).abs() < 1e-6);
        assert!(rings.material.cast_shadow && rings.material.receive_shadow);
    }
}
