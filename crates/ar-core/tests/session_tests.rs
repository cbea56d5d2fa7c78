// Host-side tests for the viewing session: interaction toggling and
// stale-load rejection.

use ar_core::*;
use glam::{Vec2, Vec3};

#[derive(Default)]
struct RecordingSurface {
    capture: bool,
    calls: Vec<bool>,
}

impl GestureSurface for RecordingSurface {
    fn set_gesture_capture(&mut self, capture: bool) {
        self.capture = capture;
        self.calls.push(capture);
    }
}

fn session() -> ViewerSession<&'static str> {
    ViewerSession::new(
        DEFAULT_CATALOG.to_vec(),
        ModelFramer::for_device(DeviceClass::Desktop),
        16.0 / 9.0,
    )
}

fn asset(name: &'static str, size: f32) -> LoadedAsset<&'static str> {
    LoadedAsset::new(name, BoundingBox::new(Vec3::ZERO, Vec3::splat(size)))
}

#[test]
fn new_session_starts_idle_with_framed_camera() {
    let s = session();
    assert_eq!(s.mode(), InteractionMode::Idle);
    assert!(!s.control_state().enabled);
    assert_eq!(s.camera().eye, Vec3::new(0.0, 0.0, 2.0));
    assert!(s.asset().is_none());
    assert_eq!(s.selected_index(), None);
    assert_eq!(s.asset_revision(), 0);
}

#[test]
fn toggle_keeps_controller_and_surface_in_step() {
    let mut s = session();
    let mut surface = RecordingSurface::default();

    assert_eq!(s.toggle_interaction(&mut surface), InteractionMode::Interacting);
    assert!(s.control_state().enabled);
    assert!(surface.capture);

    assert_eq!(s.toggle_interaction(&mut surface), InteractionMode::Idle);
    assert!(!s.control_state().enabled);
    assert!(!surface.capture);

    // An even number of toggles ends where it started.
    for _ in 0..4 {
        s.toggle_interaction(&mut surface);
    }
    assert_eq!(s.mode(), InteractionMode::Idle);
    assert_eq!(s.control_state().enabled, surface.capture);
}

#[test]
fn selecting_a_model_forces_idle() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    s.toggle_interaction(&mut surface);

    let ticket = s.select_model(1, &mut surface).unwrap();
    assert_eq!(ticket.index(), 1);
    assert_eq!(s.selected().map(|m| m.name), Some("Elk"));
    assert_eq!(s.mode(), InteractionMode::Idle);
    assert!(!s.control_state().enabled);
    assert!(!surface.capture);
}

#[test]
fn only_the_latest_selection_is_applied() {
    let mut s = session();
    let mut surface = RecordingSurface::default();

    let bear = s.select_model(0, &mut surface).unwrap();
    let owl = s.select_model(2, &mut surface).unwrap();
    assert!(!s.is_current(&bear));
    assert!(s.is_current(&owl));

    // Owl resolves first, then the slower Bear load arrives.
    let applied = s.complete_load(owl, Ok(asset("owl", 2.0)), &mut surface);
    assert!(matches!(applied, LoadOutcome::Applied(_)));
    let stale = s.complete_load(bear, Ok(asset("bear", 4.0)), &mut surface);
    assert_eq!(stale, LoadOutcome::Stale);

    assert_eq!(s.asset().map(|a| a.root), Some("owl"));
    assert_eq!(s.asset_revision(), 1);
}

#[test]
fn stale_load_arriving_first_is_still_dropped() {
    let mut s = session();
    let mut surface = RecordingSurface::default();

    let bear = s.select_model(0, &mut surface).unwrap();
    let owl = s.select_model(2, &mut surface).unwrap();

    assert_eq!(
        s.complete_load(bear, Ok(asset("bear", 4.0)), &mut surface),
        LoadOutcome::Stale
    );
    assert!(s.asset().is_none());
    assert!(matches!(
        s.complete_load(owl, Ok(asset("owl", 2.0)), &mut surface),
        LoadOutcome::Applied(_)
    ));
    assert_eq!(s.asset().map(|a| a.root), Some("owl"));
}

#[test]
fn reselecting_the_same_entry_invalidates_the_first_load() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    let first = s.select_model(3, &mut surface).unwrap();
    let second = s.select_model(3, &mut surface).unwrap();
    assert_ne!(first, second);
    assert_eq!(
        s.complete_load(first, Ok(asset("a", 1.0)), &mut surface),
        LoadOutcome::Stale
    );
}

#[test]
fn applied_placement_matches_normalize() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    let t = s.select_model(0, &mut surface).unwrap();
    let a = asset("bear", 4.0);
    let expected = s.framer().normalize(&a.bounds);

    assert_eq!(
        s.complete_load(t, Ok(a), &mut surface),
        LoadOutcome::Applied(expected)
    );
    assert_eq!(s.placement(), expected);
    assert_eq!(s.model_matrix(), expected.matrix());
    assert!((expected.scale - 0.3).abs() < 1e-6);
}

#[test]
fn failed_load_keeps_the_previous_asset() {
    let mut s = session();
    let mut surface = RecordingSurface::default();

    let t = s.select_model(0, &mut surface).unwrap();
    s.complete_load(t, Ok(asset("bear", 4.0)), &mut surface);
    let before = s.placement();

    let t = s.select_model(1, &mut surface).unwrap();
    let outcome = s.complete_load(t, Err(LoadError::NoGeometry), &mut surface);
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(s.asset().map(|a| a.root), Some("bear"));
    assert_eq!(s.placement(), before);
    assert_eq!(s.asset_revision(), 1);
    assert_eq!(s.mode(), InteractionMode::Idle);
}

#[test]
fn failed_load_restores_the_displayed_selection() {
    let mut s = session();
    let mut surface = RecordingSurface::default();

    let t = s.select_by_name("Bear", &mut surface).unwrap();
    s.complete_load(t, Ok(asset("bear", 4.0)), &mut surface);
    assert_eq!(s.displayed_index(), Some(0));

    let t = s.select_by_name("Owl", &mut surface).unwrap();
    assert_eq!(s.selected().map(|m| m.name), Some("Owl"));
    let outcome = s.complete_load(t, Err(LoadError::NoGeometry), &mut surface);
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(s.selected().map(|m| m.name), Some("Bear"));
    assert_eq!(s.selected_index(), Some(0));
    assert_eq!(s.displayed_index(), Some(0));

    // Re-selecting the failed entry starts a fresh load.
    let t = s.select_by_name("Owl", &mut surface).unwrap();
    assert!(s.is_current(&t));
}

#[test]
fn failed_first_load_leaves_nothing_selected() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    let t = s.select_model(2, &mut surface).unwrap();
    s.complete_load(t, Err(LoadError::NoGeometry), &mut surface);
    assert_eq!(s.selected_index(), None);
    assert!(s.asset().is_none());
}

#[test]
fn completing_a_load_while_interacting_returns_to_idle() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    let t = s.select_model(4, &mut surface).unwrap();
    s.toggle_interaction(&mut surface);
    assert!(surface.capture);

    s.complete_load(t, Ok(asset("horse", 1.0)), &mut surface);
    assert_eq!(s.mode(), InteractionMode::Idle);
    assert!(!s.control_state().enabled);
    assert!(!surface.capture);
}

#[test]
fn unknown_selections_are_rejected_without_side_effects() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    let t = s.select_model(0, &mut surface).unwrap();

    assert_eq!(
        s.select_model(42, &mut surface),
        Err(SessionError::UnknownIndex(42))
    );
    assert_eq!(
        s.select_by_name("Dragon", &mut surface),
        Err(SessionError::UnknownName("Dragon".into()))
    );
    assert!(s.is_current(&t));
    assert_eq!(s.selected_index(), Some(0));
}

#[test]
fn select_by_name_resolves_the_catalog_entry() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    let t = s.select_by_name("panther", &mut surface).unwrap();
    assert_eq!(t.index(), 3);
}

#[test]
fn gestures_only_move_the_camera_while_interacting() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    let drag = GestureFrame {
        rotate: Vec2::new(200.0, 0.0),
        ..Default::default()
    };

    let home = Vec3::new(0.0, 0.0, 2.0);

    s.apply_gesture(&drag, 800.0);
    assert!(!s.tick(1.0 / 60.0));
    assert!((s.camera().eye - home).length() < 1e-5);

    s.toggle_interaction(&mut surface);
    s.apply_gesture(&drag, 800.0);
    assert!(s.tick(1.0 / 60.0));
    assert!((s.camera().eye - home).length() > 0.1);
}

#[test]
fn reset_view_restores_the_framed_pose_and_keeps_mode() {
    let mut s = session();
    let mut surface = RecordingSurface::default();
    s.toggle_interaction(&mut surface);
    s.apply_gesture(
        &GestureFrame {
            rotate: Vec2::new(300.0, 100.0),
            ..Default::default()
        },
        800.0,
    );
    for _ in 0..30 {
        s.tick(1.0 / 60.0);
    }
    s.reset_view();
    assert_eq!(s.camera().eye, Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(s.camera().target, Vec3::ZERO);
    assert_eq!(s.mode(), InteractionMode::Interacting);
    assert!(!s.tick(1.0 / 60.0));
}
