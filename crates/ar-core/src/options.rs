//! Device classes, camera facing and URL-query configuration.

use crate::constants::MOBILE_BREAKPOINT_PX;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Narrow viewports and coarse (touch) primary pointers count as mobile.
    pub fn classify(viewport_width_css: f64, coarse_pointer: bool) -> Self {
        if coarse_pointer || viewport_width_css < MOBILE_BREAKPOINT_PX {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Some(DeviceClass::Desktop),
            "mobile" => Some(DeviceClass::Mobile),
            _ => None,
        }
    }
}

/// Which physical camera supplies the video background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacingMode {
    User,
    #[default]
    Environment,
}

impl FacingMode {
    /// Value for the `facingMode` media-track constraint.
    pub fn as_constraint(self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "front" => Some(FacingMode::User),
            "environment" | "back" | "rear" => Some(FacingMode::Environment),
            _ => None,
        }
    }
}

/// Runtime options read from the page URL, e.g. `?model=owl&strict=1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewerOptions {
    pub restrict_azimuth: bool,
    pub initial_model: Option<String>,
    pub facing: FacingMode,
    pub device_override: Option<DeviceClass>,
}

impl ViewerOptions {
    /// Parse a `location.search` string. Unknown keys and malformed values
    /// are ignored so a bad link still opens the viewer with defaults.
    pub fn from_query(search: &str) -> Self {
        let mut opts = ViewerOptions::default();
        let query = search.strip_prefix('?').unwrap_or(search);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            let value = value.replace('+', " ");
            match key {
                "strict" => opts.restrict_azimuth = parse_flag(&value),
                "model" if !value.trim().is_empty() => {
                    opts.initial_model = Some(value.trim().to_string())
                }
                "facing" => {
                    if let Some(f) = FacingMode::parse(&value) {
                        opts.facing = f;
                    }
                }
                "device" => opts.device_override = DeviceClass::parse(&value),
                _ => {}
            }
        }
        opts
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "1" | "true" | "yes" | "on"
    )
}
