// Host-side tests for web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_unique_and_present_in_page() {
    let ids = [
        CANVAS_ID,
        VIDEO_ID,
        PICKER_ID,
        INTERACT_BUTTON_ID,
        FLIP_BUTTON_ID,
        RESET_BUTTON_ID,
        HELP_BUTTON_ID,
        HELP_OVERLAY_ID,
        HELP_CLOSE_ID,
        LOADING_ID,
    ];
    let page = include_str!("../index.html");
    for (i, a) in ids.iter().enumerate() {
        assert!(page.contains(&format!("id=\"{a}\"")), "index.html lacks #{a}");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lighting_matches_viewer_defaults() {
    assert!((AMBIENT_INTENSITY - 0.6).abs() < 1e-6);
    assert!((DIRECTIONAL_INTENSITY - 0.8).abs() < 1e-6);
    assert_eq!(LIGHT_POSITION, [0.0, 10.0, 5.0]);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_dt_clamp_is_positive_and_short() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
}

#[test]
fn interact_labels_differ() {
    assert_ne!(INTERACT_LABEL_IDLE, INTERACT_LABEL_ACTIVE);
}

#[test]
fn light_direction_is_unit_and_points_at_the_light() {
    let [x, y, z] = light_direction();
    assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-6);
    let expected = [0.0, 10.0 / 125f32.sqrt(), 5.0 / 125f32.sqrt()];
    for (a, b) in [x, y, z].iter().zip(expected) {
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }
}
