use std::f32::consts::PI;

// Framing and interaction tuning shared by every front-end.

// Normalization
pub const TARGET_SIZE: f32 = 1.2; // largest model dimension after normalization (world units)
pub const DESKTOP_SCALE_FACTOR: f32 = 1.0;
pub const MOBILE_SCALE_FACTOR: f32 = 0.85; // constrained form factors

// Camera framing distance along +Z
pub const DESKTOP_CAMERA_DISTANCE: f32 = 2.0;
pub const MOBILE_CAMERA_DISTANCE: f32 = 2.4;

// Perspective
pub const CAMERA_FOV_DEGREES: f32 = 70.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Orbit distance limits [min, max]
pub const DESKTOP_DISTANCE_BOUNDS: [f32; 2] = [0.8, 5.0];
pub const MOBILE_DISTANCE_BOUNDS: [f32; 2] = [1.2, 3.5];

// Polar limits keep the camera between "slightly above" and "just under" the horizon
pub const POLAR_BOUNDS: [f32; 2] = [0.2 * PI, 0.7 * PI];

// Front-facing half-turn used when the azimuth restriction is on
pub const AZIMUTH_HALF_TURN_BOUNDS: [f32; 2] = [-PI / 2.0, PI / 2.0];

// Controller response
pub const DAMPING_FACTOR: f32 = 0.25; // fraction of pending motion applied per 60 Hz frame
pub const DAMPING_REFERENCE_HZ: f32 = 60.0;
pub const ROTATE_SPEED: f32 = 1.0;
pub const ZOOM_SPEED: f32 = 1.0;
pub const PAN_SPEED: f32 = 1.0;
pub const WHEEL_ZOOM_STEP: f32 = 0.95; // dolly factor per wheel notch, raised to ZOOM_SPEED

// Viewport breakpoint separating the mobile and desktop device classes (CSS px)
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
