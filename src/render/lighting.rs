//! CPU evaluation of the fragment programs for a single surface point.
//!
//! Mirrors [`PHONG_FRAGMENT`](super::shaders::PHONG_FRAGMENT) and
//! [`TOON_FRAGMENT`](super::shaders::TOON_FRAGMENT) so the uniform layout fed
//! by the renderer can be checked without a GPU.

use glam::Vec3;

use crate::scene::LightSnapshot;
use crate::types::Material;

/// Lower luminance bounds of the toon bands 0.5 and 1.0.
pub const TOON_THRESHOLDS: [f32; 2] = [0.3, 1.0];

/// A shaded point in world space.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    pub position: Vec3,
    pub normal: Vec3,
    pub eye: Vec3,
}

fn light_position(lights: &LightSnapshot<'_>, i: usize) -> Vec3 {
    Vec3::from_slice(&lights.positions[i * 3..i * 3 + 3])
}

fn light_color(lights: &LightSnapshot<'_>, i: usize) -> Vec3 {
    Vec3::from_slice(&lights.colors[i * 3..i * 3 + 3])
}

/// Blinn-Phong colour [r, g, b, a]. Light contributions are summed.
pub fn phong(
    material: &Material,
    point: &SurfacePoint,
    lights: &LightSnapshot<'_>,
    ambient_light: [f32; 3],
) -> [f32; 4] {
    let normal = point.normal.normalize_or_zero();
    let to_view = (point.eye - point.position).normalize_or_zero();
    let diffuse = Vec3::from(material.diffuse_rgb());
    let specular = Vec3::from(material.specular);

    let mut diffuse_sum = Vec3::ZERO;
    let mut specular_sum = Vec3::ZERO;
    for i in 0..lights.count {
        let to_light = (light_position(lights, i) - point.position).normalize_or_zero();
        let radiance = light_color(lights, i) * lights.intensities[i];

        let diffuse_factor = normal.dot(to_light).max(0.0);
        diffuse_sum += diffuse * diffuse_factor * radiance;

        let half = (to_light + to_view).normalize_or_zero();
        let specular_factor = normal.dot(half).max(0.0).powf(material.shininess * 0.3);
        specular_sum += specular * specular_factor * radiance;
    }

    let color = diffuse_sum
        + specular_sum
        + Vec3::from(ambient_light) * Vec3::from(material.ambient)
        + Vec3::from(material.emissive);
    [color.x, color.y, color.z, material.opacity]
}

/// Quantize a luminance sum into one of the bands {0, 0.5, 1}.
pub fn toon_band(luminance: f32) -> f32 {
    if luminance < TOON_THRESHOLDS[0] {
        0.0
    } else if luminance < TOON_THRESHOLDS[1] {
        0.5
    } else {
        1.0
    }
}

/// Toon grey level for a point. Light colour is ignored; intensity is not.
pub fn toon(point: &SurfacePoint, lights: &LightSnapshot<'_>) -> f32 {
    let normal = point.normal.normalize_or_zero();
    let lit: f32 = (0..lights.count)
        .map(|i| {
            let to_light = (light_position(lights, i) - point.position).normalize_or_zero();
            normal.dot(to_light).max(0.0) * lights.intensities[i]
        })
        .sum();
    // The shader adds the scalar to every channel, then sums r + g + b.
    toon_band(lit * 3.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::scene::{Light, LightSet};

    fn up_facing() -> SurfacePoint {
        SurfacePoint {
            position: Vec3::ZERO,
            normal: Vec3::Y,
            eye: Vec3::new(0.0, 10.0, 0.0),
        }
    }

    fn overhead(intensity: f32) -> Light {
        Light {
            position: [0.0, 5.0, 0.0],
            color: [1.0, 1.0, 1.0],
            intensity,
        }
    }

    fn matte() -> Material {
        Material {
            specular: [0.0; 3],
            ..Default::default()
        }
    }

    #[test]
    fn toon_bands() {
        assert_eq!(toon_band(0.0), 0.0);
        assert_eq!(toon_band(0.29), 0.0);
        assert_eq!(toon_band(0.3), 0.5);
        assert_eq!(toon_band(0.99), 0.5);
        assert_eq!(toon_band(1.0), 1.0);
        assert_eq!(toon_band(7.0), 1.0);
    }

    #[test]
    fn no_lights_leaves_ambient_and_emissive() {
        let set = LightSet::new();
        let material = Material {
            ambient: [0.5, 0.5, 0.5],
            emissive: [0.0, 0.2, 0.0],
            ..Default::default()
        };
        let c = phong(&material, &up_facing(), &set.snapshot(), [0.1, 0.1, 0.1]);
        assert_abs_diff_eq!(c[0], 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(c[1], 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(c[3], 1.0);
        assert_eq!(toon(&up_facing(), &set.snapshot()), 0.0);
    }

    #[test]
    fn contributions_sum_without_normalization() {
        let mut one = LightSet::new();
        one.add(overhead(1.0));
        let mut two = one.clone();
        two.add(overhead(1.0));

        let single = phong(&matte(), &up_facing(), &one.snapshot(), [0.0; 3]);
        let double = phong(&matte(), &up_facing(), &two.snapshot(), [0.0; 3]);
        assert_abs_diff_eq!(single[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(double[0], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn light_behind_surface_contributes_nothing() {
        let mut set = LightSet::new();
        set.add(Light {
            position: [0.0, -5.0, 0.0],
            ..overhead(1.0)
        });
        let c = phong(&matte(), &up_facing(), &set.snapshot(), [0.0; 3]);
        assert_eq!(&c[..3], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn light_color_tints_diffuse() {
        let mut set = LightSet::new();
        set.add(Light {
            color: [1.0, 0.0, 0.5],
            ..overhead(1.0)
        });
        let c = phong(&matte(), &up_facing(), &set.snapshot(), [0.0; 3]);
        assert_abs_diff_eq!(c[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c[2], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn toon_scales_with_intensity() {
        let point = up_facing();
        let band = |intensity: f32| {
            let mut set = LightSet::new();
            set.add(overhead(intensity));
            toon(&point, &set.snapshot())
        };
        assert_eq!(band(0.05), 0.0); // 0.15
        assert_eq!(band(0.2), 0.5); // 0.6
        assert_eq!(band(0.5), 1.0); // 1.5
    }
}
