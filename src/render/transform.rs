use glam::{Mat4, Vec3};

/// World matrix of a scene instance:
/// `I · T(offset) · T(translation) · Rx · Ry · Rz · S`.
///
/// The order is fixed; points are scaled first and centred last.
pub fn instance_world(
    offset: [f32; 3],
    translation: [f32; 3],
    rotation: [f32; 3],
    scale: [f32; 3],
) -> Mat4 {
    Mat4::IDENTITY
        * Mat4::from_translation(Vec3::from(offset))
        * Mat4::from_translation(Vec3::from(translation))
        * Mat4::from_rotation_x(rotation[0])
        * Mat4::from_rotation_y(rotation[1])
        * Mat4::from_rotation_z(rotation[2])
        * Mat4::from_scale(Vec3::from(scale))
}

/// World matrix of a bare model preview spinning about Y: `I · T(offset) · Ry(angle)`.
pub fn preview_world(offset: [f32; 3], angle: f32) -> Mat4 {
    Mat4::IDENTITY * Mat4::from_translation(Vec3::from(offset)) * Mat4::from_rotation_y(angle)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::types::BoundingBox;

    fn transformed_bounds(world: Mat4, half: [f32; 3]) -> BoundingBox {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { -half[0] } else { half[0] },
                if i & 2 == 0 { -half[1] } else { half[1] },
                if i & 4 == 0 { -half[2] } else { half[2] },
            );
            let p = world.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        BoundingBox {
            min: min.to_array(),
            max: max.to_array(),
        }
    }

    #[test]
    fn unit_cube_translate_then_scale() {
        let world = instance_world([0.0; 3], [1.0, 0.0, 0.0], [0.0; 3], [2.0, 1.0, 1.0]);
        let bb = transformed_bounds(world, [0.5, 0.5, 0.5]);
        assert_abs_diff_eq!(bb.min[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bb.max[0], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bb.min[1], -0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(bb.max[1], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(bb.min[2], -0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(bb.max[2], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn box_with_unit_half_height() {
        // [-0.5, 0.5] x [-1, 1] x [-1, 1] -> [0, 2] x [-1, 1] x [-1, 1]
        let world = instance_world([0.0; 3], [1.0, 0.0, 0.0], [0.0; 3], [2.0, 1.0, 1.0]);
        let bb = transformed_bounds(world, [0.5, 1.0, 1.0]);
        let expected = BoundingBox {
            min: [0.0, -1.0, -1.0],
            max: [2.0, 1.0, 1.0],
        };
        for i in 0..3 {
            assert_abs_diff_eq!(bb.min[i], expected.min[i], epsilon = 1e-6);
            assert_abs_diff_eq!(bb.max[i], expected.max[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn rotation_applies_before_translation() {
        // Rz(90°) maps +X to +Y, then translate by (5, 0, 0).
        let world = instance_world([0.0; 3], [5.0, 0.0, 0.0], [0.0, 0.0, FRAC_PI_2], [1.0; 3]);
        let p = world.transform_point3(Vec3::X);
        assert_abs_diff_eq!(p.x, 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let r = [0.3, 1.1, -0.7];
        let world = instance_world([0.0; 3], [0.0; 3], r, [1.0; 3]);
        let expected =
            Mat4::from_rotation_x(r[0]) * Mat4::from_rotation_y(r[1]) * Mat4::from_rotation_z(r[2]);
        assert!(world.abs_diff_eq(expected, 1e-6));

        let reversed =
            Mat4::from_rotation_z(r[2]) * Mat4::from_rotation_y(r[1]) * Mat4::from_rotation_x(r[0]);
        assert!(!world.abs_diff_eq(reversed, 1e-3));
    }

    #[test]
    fn offset_is_applied_outermost() {
        let world = instance_world([-1.0, -2.0, -3.0], [0.0; 3], [0.0; 3], [3.0; 3]);
        let p = world.transform_point3(Vec3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(p.x, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 4.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.z, 6.0, epsilon = 1e-6);
    }

    #[test]
    fn preview_spins_about_local_y() {
        let world = preview_world([0.0, -1.0, 0.0], FRAC_PI_2);
        let p = world.transform_point3(Vec3::X);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.z, -1.0, epsilon = 1e-6);
    }
}
