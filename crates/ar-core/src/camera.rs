//! Perspective camera description shared with the renderer.
//!
//! The camera holds no controller state; [`crate::controls::OrbitController`]
//! reads and writes `eye`/`target` directly each frame.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, DESKTOP_CAMERA_DISTANCE};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(1.0)
    }
}

impl Camera {
    /// Viewer default: 70° vertical FOV looking down -Z from +Z.
    pub fn perspective(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, DESKTOP_CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            },
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Ignores degenerate aspect ratios (zero-sized or hidden canvases).
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.eye - self.target).length()
    }
}
