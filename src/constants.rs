// Page wiring and render tuning for the web front-end.

// Element ids shared with index.html
pub const CANVAS_ID: &str = "ar-canvas";
pub const VIDEO_ID: &str = "camera-feed";
pub const PICKER_ID: &str = "model-picker";
pub const INTERACT_BUTTON_ID: &str = "interact-toggle";
pub const FLIP_BUTTON_ID: &str = "flip-camera";
pub const RESET_BUTTON_ID: &str = "reset-view";
pub const HELP_BUTTON_ID: &str = "help-toggle";
pub const HELP_OVERLAY_ID: &str = "help-overlay";
pub const HELP_CLOSE_ID: &str = "help-close";
pub const LOADING_ID: &str = "loading-indicator";

pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";

pub const INTERACT_LABEL_IDLE: &str = "Interact";
pub const INTERACT_LABEL_ACTIVE: &str = "Done";

// Long stalls (tab switch, debugger) are clamped so damping does not jump.
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
pub const LIGHT_POSITION: [f32; 3] = [0.0, 10.0, 5.0];

/// Directional light: only the direction toward `LIGHT_POSITION` matters,
/// never the distance to the shaded point.
pub fn light_direction() -> [f32; 3] {
    let [x, y, z] = LIGHT_POSITION;
    let len = (x * x + y * y + z * z).sqrt();
    if len <= f32::EPSILON {
        return [0.0, 1.0, 0.0];
    }
    [x / len, y / len, z / len]
}

