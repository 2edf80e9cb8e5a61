use glam::{Mat4, Vec3};

use crate::config::RenderConfig;
use crate::types::BoundingBox;

/// Smallest camera distance used for degenerate (zero-size) models.
const MIN_RADIUS: f32 = 1e-3;

/// Perspective look-at camera for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Frame a single model at its natural scale.
    ///
    /// The eye sits on +Z at `|max - min| * radius_factor`; clip planes are
    /// derived from that distance.
    pub fn for_model(bounds: &BoundingBox, aspect: f32, config: &RenderConfig) -> Self {
        let radius = (bounds.diagonal() * config.radius_factor).max(MIN_RADIUS);
        Self {
            eye: Vec3::new(0.0, 0.0, radius),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: config.fov_degrees.to_radians(),
            aspect,
            near: radius / 100.0,
            far: radius * 3.0,
        }
    }

    /// Fixed camera over the combined scene.
    pub fn for_scene(aspect: f32, config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::from(config.scene_eye),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: config.fov_degrees.to_radians(),
            aspect,
            near: config.scene_near,
            far: config.scene_far,
        }
    }

    /// World-to-view matrix (inverse of the camera's look-at frame).
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style clip-space projection.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }
}
