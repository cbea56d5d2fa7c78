//! Model normalization and view framing.
//!
//! Loaded assets arrive at arbitrary positions and scales. The framer moves
//! an asset's bounding-box center to the origin, scales its longest axis to
//! a canonical size, parks the camera on +Z looking at the origin and
//! re-establishes the orbit-control bounds for the new model.

use crate::bounds::BoundingBox;
use crate::camera::Camera;
use crate::constants::*;
use crate::controls::{ControlState, InteractionController};
use crate::options::DeviceClass;
use glam::{Mat4, Vec3};

/// Transform that centers and scales an asset. Derived, never stored on
/// the asset itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPlacement {
    /// Applied before scaling.
    pub translation: Vec3,
    pub scale: f32,
}

impl Default for NormalizedPlacement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl NormalizedPlacement {
    pub const IDENTITY: NormalizedPlacement = NormalizedPlacement {
        translation: Vec3::ZERO,
        scale: 1.0,
    };

    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        (p + self.translation) * self.scale
    }

    pub fn apply_to_bounds(&self, b: &BoundingBox) -> BoundingBox {
        if b.is_empty() {
            return *b;
        }
        BoundingBox::new(self.apply(b.min), self.apply(b.max))
    }

    /// Model matrix: translate first, then scale uniformly.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_translation(self.translation)
    }
}

/// Center `bounds` on the origin and scale its longest axis to
/// `target_size * device_scale_factor`.
///
/// Zero-extent and empty boxes keep `scale == 1.0`; an empty box also gets a
/// zero translation since it has no meaningful center.
pub fn normalize(
    bounds: &BoundingBox,
    target_size: f32,
    device_scale_factor: f32,
) -> NormalizedPlacement {
    let center = bounds.center();
    let max_dim = bounds.max_dimension();
    let scale = if max_dim > 0.0 && max_dim.is_finite() {
        (target_size / max_dim) * device_scale_factor
    } else {
        1.0
    };
    NormalizedPlacement {
        translation: -center,
        scale,
    }
}

/// Park the camera at `(0, 0, distance)` looking at the origin.
pub fn frame_camera(camera: &mut Camera, distance: f32) {
    camera.eye = Vec3::new(0.0, 0.0, distance);
    camera.target = Vec3::ZERO;
    camera.up = Vec3::Y;
}

/// Replace the controller's bounds with the configured ones, force its
/// target back to the origin and leave it disabled. Nothing from the
/// previous configuration survives.
pub fn configure_controls<C: InteractionController + ?Sized>(
    controller: &mut C,
    config: &FramerConfig,
) -> ControlState {
    controller.reset();
    controller.set_target(Vec3::ZERO);
    let [dmin, dmax] = config.distance_bounds;
    controller.set_distance_bounds(dmin, dmax);
    let [pmin, pmax] = config.polar_bounds;
    controller.set_polar_bounds(pmin, pmax);
    controller.set_azimuth_bounds(config.azimuth_bounds());
    controller.set_enabled(false);
    controller.control_state()
}

/// Per-device framing constants plus the strictness flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramerConfig {
    pub target_size: f32,
    pub device_scale_factor: f32,
    pub camera_distance: f32,
    pub distance_bounds: [f32; 2],
    pub polar_bounds: [f32; 2],
    /// Lock yaw to the front-facing half-turn.
    pub restrict_azimuth: bool,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self::for_device(DeviceClass::Desktop)
    }
}

impl FramerConfig {
    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Desktop => Self {
                target_size: TARGET_SIZE,
                device_scale_factor: DESKTOP_SCALE_FACTOR,
                camera_distance: DESKTOP_CAMERA_DISTANCE,
                distance_bounds: DESKTOP_DISTANCE_BOUNDS,
                polar_bounds: POLAR_BOUNDS,
                restrict_azimuth: false,
            },
            DeviceClass::Mobile => Self {
                target_size: TARGET_SIZE,
                device_scale_factor: MOBILE_SCALE_FACTOR,
                camera_distance: MOBILE_CAMERA_DISTANCE,
                distance_bounds: MOBILE_DISTANCE_BOUNDS,
                polar_bounds: POLAR_BOUNDS,
                restrict_azimuth: false,
            },
        }
    }

    pub fn with_azimuth_restriction(mut self, restrict: bool) -> Self {
        self.restrict_azimuth = restrict;
        self
    }

    pub fn azimuth_bounds(&self) -> Option<[f32; 2]> {
        self.restrict_azimuth.then_some(AZIMUTH_HALF_TURN_BOUNDS)
    }
}

/// Runs the normalize → frame → configure sequence with one config.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelFramer {
    config: FramerConfig,
}

impl ModelFramer {
    pub fn new(config: FramerConfig) -> Self {
        Self { config }
    }

    pub fn for_device(device: DeviceClass) -> Self {
        Self::new(FramerConfig::for_device(device))
    }

    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    pub fn normalize(&self, bounds: &BoundingBox) -> NormalizedPlacement {
        normalize(
            bounds,
            self.config.target_size,
            self.config.device_scale_factor,
        )
    }

    pub fn frame_camera(&self, camera: &mut Camera) {
        frame_camera(camera, self.config.camera_distance);
    }

    pub fn configure_controls<C: InteractionController + ?Sized>(
        &self,
        controller: &mut C,
    ) -> ControlState {
        configure_controls(controller, &self.config)
    }

    /// Full framing pass for a freshly loaded asset. Must complete before the
    /// next rendered frame observes the asset.
    pub fn frame_asset<C: InteractionController + ?Sized>(
        &self,
        bounds: &BoundingBox,
        camera: &mut Camera,
        controller: &mut C,
    ) -> (NormalizedPlacement, ControlState) {
        let placement = self.normalize(bounds);
        self.frame_camera(camera);
        let state = self.configure_controls(controller);
        (placement, state)
    }
}
