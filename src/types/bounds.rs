use glam::Vec3;

use super::GeometryGroup;

/// Axis-aligned bounding box in 3-D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    /// Scan all vertex positions and return the axis-aligned bounding box.
    ///
    /// With no vertices, a zero-size box at the origin is returned.
    pub fn from_groups(groups: &[GeometryGroup]) -> BoundingBox {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for group in groups {
            for p in group.positions.chunks_exact(3) {
                let p = Vec3::new(p[0], p[1], p[2]);
                min = min.min(p);
                max = max.max(p);
            }
        }

        if min.x == f32::INFINITY {
            return BoundingBox {
                min: [0.0; 3],
                max: [0.0; 3],
            };
        }

        BoundingBox {
            min: min.to_array(),
            max: max.to_array(),
        }
    }

    /// Extent along each axis (`max - min`).
    pub fn range(&self) -> [f32; 3] {
        (Vec3::from(self.max) - Vec3::from(self.min)).to_array()
    }

    /// Centre point of the box.
    pub fn center(&self) -> [f32; 3] {
        (Vec3::from(self.min) + Vec3::from(self.range()) * 0.5).to_array()
    }

    /// Translation that moves the box centre onto the origin.
    pub fn centering_offset(&self) -> [f32; 3] {
        (-Vec3::from(self.center())).to_array()
    }

    /// Length of the space diagonal.
    pub fn diagonal(&self) -> f32 {
        Vec3::from(self.range()).length()
    }
}
