use std::fmt::{self, Display, Formatter};

use glam::{Affine3A, Vec3};

use crate::core::geometry::Mesh;
use crate::core::Light;

#[derive(Clone, Debug)]
pub struct Entity {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Affine3A,
    /// Per-object animation hook: radians/sec around each axis. Entities
    /// without one never move after setup.
    pub spin: Option<Vec3>,
}

impl Entity {
    pub fn new(name: impl Into<String>, mesh: Mesh, transform: Affine3A) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform,
            spin: None,
        }
    }

    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = Some(spin);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation.into()
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Entity: {:?}", self.name)
    }
}

/// The renderable world: an unordered entity list plus the light sources.
/// One viewport owns one scene; nothing is shared across scenes.
#[derive(Clone, Default)]
pub struct Scene {
    pub entities: Vec<Entity>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Advance declared spin hooks by `delta` seconds. A scene where no
    /// entity declares a spin is left byte-identical.
    pub fn update(&mut self, delta: f32) {
        for entity in &mut self.entities {
            if let Some(spin) = entity.spin {
                entity.transform = entity.transform
                    * Affine3A::from_rotation_x(spin.x * delta)
                    * Affine3A::from_rotation_y(spin.y * delta)
                    * Affine3A::from_rotation_z(spin.z * delta);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Material;

    fn still_cube() -> Entity {
        Entity::new(
            "cube",
            Mesh::cube(1.0, Material::default()),
            Affine3A::IDENTITY,
        )
    }

    #[test]
    fn update_without_spin_is_a_noop() {
        let mut scene = Scene::new();
        scene.add_entity(still_cube());
        let before = scene.entities[0].transform;
        for _ in 0..10 {
            scene.update(0.016);
        }
        assert_eq!(scene.entities[0].transform, before);
    }

    #[test]
    fn update_applies_declared_spin() {
        let mut scene = Scene::new();
        scene.add_entity(still_cube().with_spin(Vec3::new(0.0, 1.0, 0.0)));
        let before = scene.entities[0].transform;
        scene.update(0.5);
        assert_ne!(scene.entities[0].transform, before);
        // Spin never moves the entity, only rotates it
        assert_eq!(scene.entities[0].position(), Vec3::ZERO);
    }
}
