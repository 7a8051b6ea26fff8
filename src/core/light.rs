use crate::core::geometry::Material;
use crate::core::Color;
use glam::Vec3;

/// The two kinds of lights the scene graph carries.
#[derive(Clone, Debug)]
pub enum Light {
    /// Uniform illumination with no position or direction.
    Ambient {
        color: Color,
        intensity: f32,
    },
    /// A point light emits in all directions from a position and falls
    /// off linearly out to `range` (no contribution beyond it).
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
        range: f32,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    pub fn point(position: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Light::Point {
            position,
            color,
            intensity,
            range,
        }
    }
}

/// Swappable lighting presets. The scene history had several incompatible
/// rigs live at different times; they are config options here rather than
/// commented-out setup blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightRig {
    /// A single soft gray ambient light.
    AmbientOnly,
    /// Dim white ambient plus one white point light at the origin.
    SinglePoint,
    /// Dim ambient plus three colored point lights at fixed offsets.
    ThreePoint,
}

impl LightRig {
    pub fn lights(&self) -> Vec<Light> {
        match self {
            LightRig::AmbientOnly => {
                vec![Light::ambient(Color::from_u32(0x404040), 1.0)]
            }
            LightRig::SinglePoint => vec![
                Light::ambient(Color::WHITE, 0.01),
                Light::point(Vec3::ZERO, Color::WHITE, 0.5, 100.0),
            ],
            LightRig::ThreePoint => vec![
                Light::ambient(Color::WHITE, 0.01),
                Light::point(Vec3::new(3.0, 2.0, 3.0), Color::RED, 0.4, 20.0),
                Light::point(Vec3::new(-3.0, 1.0, -2.0), Color::GREEN, 0.4, 20.0),
                Light::point(Vec3::new(0.0, -3.0, 2.0), Color::BLUE, 0.4, 20.0),
            ],
        }
    }
}

pub trait LightingModel {
    /// Computes the final color for a surface point given the scene's
    /// lights and the material.
    ///
    /// - `pos`: world-space position of the point.
    /// - `normal`: surface normal (normalized).
    /// - `lights`: the lights in the scene.
    /// - `material`: the material of the surface.
    fn shade(&self, pos: Vec3, normal: Vec3, lights: &[Light], material: &Material) -> Color;
}

/// One color per face: emissive term plus ambient plus Lambert diffuse,
/// evaluated once at the face centroid.
pub struct FlatShading;

impl LightingModel for FlatShading {
    fn shade(&self, pos: Vec3, normal: Vec3, lights: &[Light], material: &Material) -> Color {
        let base = material.base_color;

        // The emissive term is independent of the rig; a planet with no
        // lights at all still shows its own color.
        let mut final_color = Color::new(
            base.r * material.emissive_intensity,
            base.g * material.emissive_intensity,
            base.b * material.emissive_intensity,
        );

        for light in lights {
            match light {
                Light::Ambient { color, intensity } => {
                    final_color.r += base.r * color.r * intensity;
                    final_color.g += base.g * color.g * intensity;
                    final_color.b += base.b * color.b * intensity;
                }
                Light::Point {
                    position,
                    color,
                    intensity,
                    range,
                } => {
                    let to_light = *position - pos;
                    let distance = to_light.length();
                    if *range > 0.0 && distance >= *range {
                        continue;
                    }

                    let attenuation = if *range > 0.0 {
                        1.0 - distance / range
                    } else {
                        1.0
                    };

                    let light_dir = to_light.normalize_or_zero();
                    let diff = normal.dot(light_dir).max(0.0);

                    final_color.r += base.r * color.r * diff * intensity * attenuation;
                    final_color.g += base.g * color.g * diff * intensity * attenuation;
                    final_color.b += base.b * color.b * diff * intensity * attenuation;
                }
            }
        }

        final_color.clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rigs_have_expected_shapes() {
        assert_eq!(LightRig::AmbientOnly.lights().len(), 1);
        assert_eq!(LightRig::SinglePoint.lights().len(), 2);
        assert_eq!(LightRig::ThreePoint.lights().len(), 4);

        let single = LightRig::SinglePoint.lights();
        assert!(matches!(single[0], Light::Ambient { .. }));
        match &single[1] {
            Light::Point { position, .. } => assert_eq!(*position, Vec3::ZERO),
            other => panic!("expected point light, got {:?}", other),
        }
    }

    #[test]
    fn emissive_survives_darkness() {
        let mat = Material::emissive(Color::new(1.0, 0.5, 0.0), 0.6);
        let shaded = FlatShading.shade(Vec3::ZERO, Vec3::Y, &[], &mat);
        assert!((shaded.r - 0.6).abs() < 1e-6);
        assert!((shaded.g - 0.3).abs() < 1e-6);
        assert!(shaded.b.abs() < 1e-6);
    }

    #[test]
    fn point_light_falls_off_to_range() {
        let mat = Material::emissive(Color::WHITE, 0.0);
        let lights = vec![Light::point(Vec3::new(0.0, 2.0, 0.0), Color::WHITE, 1.0, 4.0)];

        // Surface at origin facing the light, 2 units away with range 4:
        // attenuation 0.5, full lambert.
        let lit = FlatShading.shade(Vec3::ZERO, Vec3::Y, &lights, &mat);
        assert!((lit.r - 0.5).abs() < 1e-5);

        // Past the range there is no contribution at all.
        let dark = FlatShading.shade(Vec3::new(0.0, -3.0, 0.0), Vec3::Y, &lights, &mat);
        assert_eq!(dark.to_u32(), 0);
    }

    #[test]
    fn backside_gets_no_diffuse() {
        let mat = Material::emissive(Color::WHITE, 0.0);
        let lights = vec![Light::point(Vec3::new(0.0, 2.0, 0.0), Color::WHITE, 1.0, 10.0)];
        let shaded = FlatShading.shade(Vec3::ZERO, Vec3::NEG_Y, &lights, &mat);
        assert_eq!(shaded.to_u32(), 0);
    }
}
