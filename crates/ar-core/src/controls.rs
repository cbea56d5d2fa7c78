use crate::camera::Camera;
use crate::constants::{
    DAMPING_FACTOR, DAMPING_REFERENCE_HZ, DESKTOP_DISTANCE_BOUNDS, PAN_SPEED, POLAR_BOUNDS,
    ROTATE_SPEED, ZOOM_SPEED,
};
use crate::gestures::GestureFrame;
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

// Keeps the camera off the poles where the look-at basis degenerates.
const POLE_EPS: f32 = 1e-4;
// Residual motion below this is dropped so damping settles.
const SETTLE_EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlState {
    pub enabled: bool,
    pub distance_bounds: [f32; 2],
    pub polar_bounds: [f32; 2],
    /// `None` means unbounded yaw.
    pub azimuth_bounds: Option<[f32; 2]>,
}

pub trait InteractionController {
    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);

    fn distance_bounds(&self) -> [f32; 2];
    fn set_distance_bounds(&mut self, min: f32, max: f32);
    fn polar_bounds(&self) -> [f32; 2];
    fn set_polar_bounds(&mut self, min: f32, max: f32);
    fn azimuth_bounds(&self) -> Option<[f32; 2]>;
    fn set_azimuth_bounds(&mut self, bounds: Option<[f32; 2]>);

    fn target(&self) -> Vec3;
    fn set_target(&mut self, target: Vec3);

    fn reset(&mut self);

    /// Returns whether the camera moved.
    fn update(&mut self, camera: &mut Camera, dt_sec: f32) -> bool;

    fn control_state(&self) -> ControlState {
        ControlState {
            enabled: self.enabled(),
            distance_bounds: self.distance_bounds(),
            polar_bounds: self.polar_bounds(),
            azimuth_bounds: self.azimuth_bounds(),
        }
    }
}

pub trait GestureSurface {
    fn set_gesture_capture(&mut self, capture: bool);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl GestureSurface for NullSurface {
    fn set_gesture_capture(&mut self, _capture: bool) {}
}

/// `theta` from +Z around Y, `phi` from +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: PI / 2.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// `factor` is per 60 Hz frame.
#[inline]
pub fn damping_alpha(factor: f32, dt_sec: f32) -> f32 {
    let frames = (dt_sec.clamp(0.0, 0.25)) * DAMPING_REFERENCE_HZ;
    1.0 - (1.0 - factor.clamp(0.0, 1.0)).powf(frames)
}

#[derive(Clone, Debug)]
pub struct OrbitController {
    enabled: bool,
    target: Vec3,
    distance_bounds: [f32; 2],
    polar_bounds: [f32; 2],
    azimuth_bounds: Option<[f32; 2]>,

    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    pending_pan: Vec3,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            enabled: false,
            target: Vec3::ZERO,
            distance_bounds: DESKTOP_DISTANCE_BOUNDS,
            polar_bounds: POLAR_BOUNDS,
            azimuth_bounds: None,
            damping_factor: DAMPING_FACTOR,
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
            pan_speed: PAN_SPEED,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            pending_pan: Vec3::ZERO,
        }
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    // a full-height drag turns 2π
    pub fn rotate(&mut self, delta_px: Vec2, viewport_h: f32) {
        if !self.enabled {
            return;
        }
        let h = viewport_h.max(1.0);
        self.pending_theta -= 2.0 * PI * delta_px.x / h * self.rotate_speed;
        self.pending_phi -= 2.0 * PI * delta_px.y / h * self.rotate_speed;
    }

    /// `factor > 1` moves the camera closer.
    pub fn dolly(&mut self, factor: f32) {
        if !self.enabled || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.pending_scale /= factor.powf(self.zoom_speed);
    }

    pub fn pan(&mut self, delta_px: Vec2, viewport_h: f32, camera: &Camera) {
        if !self.enabled {
            return;
        }
        let offset = camera.eye - self.target;
        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        let half_height = offset.length() * (camera.fovy_radians * 0.5).tan();
        let h = viewport_h.max(1.0);
        let dx = 2.0 * delta_px.x * half_height / h * self.pan_speed;
        let dy = 2.0 * delta_px.y * half_height / h * self.pan_speed;
        self.pending_pan += -right * dx + up * dy;
    }

    pub fn apply_gesture(&mut self, gesture: &GestureFrame, viewport_h: f32, camera: &Camera) {
        if gesture.rotate != Vec2::ZERO {
            self.rotate(gesture.rotate, viewport_h);
        }
        if gesture.pan != Vec2::ZERO {
            self.pan(gesture.pan, viewport_h, camera);
        }
        if gesture.dolly != 1.0 {
            self.dolly(gesture.dolly);
        }
    }

    pub fn is_settling(&self) -> bool {
        self.pending_theta != 0.0
            || self.pending_phi != 0.0
            || self.pending_scale != 1.0
            || self.pending_pan != Vec3::ZERO
    }

    fn clear_pending(&mut self) {
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
        self.pending_pan = Vec3::ZERO;
    }
}

impl InteractionController for OrbitController {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn distance_bounds(&self) -> [f32; 2] {
        self.distance_bounds
    }

    fn set_distance_bounds(&mut self, min: f32, max: f32) {
        let min = min.max(0.0);
        self.distance_bounds = [min.min(max), min.max(max)];
    }

    fn polar_bounds(&self) -> [f32; 2] {
        self.polar_bounds
    }

    fn set_polar_bounds(&mut self, min: f32, max: f32) {
        let (lo, hi) = (min.min(max), min.max(max));
        self.polar_bounds = [lo.clamp(0.0, PI), hi.clamp(0.0, PI)];
    }

    fn azimuth_bounds(&self) -> Option<[f32; 2]> {
        self.azimuth_bounds
    }

    fn set_azimuth_bounds(&mut self, bounds: Option<[f32; 2]>) {
        self.azimuth_bounds = bounds.map(|[a, b]| [a.min(b), a.max(b)]);
    }

    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn reset(&mut self) {
        self.clear_pending();
        self.target = Vec3::ZERO;
    }

    fn update(&mut self, camera: &mut Camera, dt_sec: f32) -> bool {
        let alpha = damping_alpha(self.damping_factor, dt_sec);

        let mut s = Spherical::from_offset(camera.eye - self.target);
        s.theta += self.pending_theta * alpha;
        s.phi += self.pending_phi * alpha;

        // `from_offset` yields theta in (-π, π]; clamping before any wrap keeps a
        // large pending yaw pinned at the bound it pushes against.
        if let Some([lo, hi]) = self.azimuth_bounds {
            s.theta = s.theta.clamp(lo, hi);
        }
        s.phi = s
            .phi
            .clamp(self.polar_bounds[0], self.polar_bounds[1])
            .clamp(POLE_EPS, PI - POLE_EPS);
        s.radius = (s.radius * self.pending_scale)
            .clamp(self.distance_bounds[0], self.distance_bounds[1]);

        self.target += self.pending_pan * alpha;

        let keep = 1.0 - alpha;
        self.pending_theta *= keep;
        self.pending_phi *= keep;
        self.pending_pan *= keep;
        self.pending_scale = 1.0;
        if self.pending_theta.abs() < SETTLE_EPS {
            self.pending_theta = 0.0;
        }
        if self.pending_phi.abs() < SETTLE_EPS {
            self.pending_phi = 0.0;
        }
        if self.pending_pan.length_squared() < SETTLE_EPS * SETTLE_EPS {
            self.pending_pan = Vec3::ZERO;
        }

        let eye = self.target + s.to_offset();
        let moved = (eye - camera.eye).length_squared() > SETTLE_EPS * SETTLE_EPS
            || (camera.target - self.target).length_squared() > SETTLE_EPS * SETTLE_EPS;
        camera.eye = eye;
        camera.target = self.target;
        moved
    }
}
