// Host-side tests for the orbit controller and its bounds.

use ar_core::*;
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

const DT: f32 = 1.0 / 60.0;

fn framed() -> (OrbitController, Camera) {
    let framer = ModelFramer::for_device(DeviceClass::Desktop);
    let mut cam = Camera::perspective(1.0);
    let mut ctl = OrbitController::new();
    framer.frame_camera(&mut cam);
    framer.configure_controls(&mut ctl);
    (ctl, cam)
}

fn settle(ctl: &mut OrbitController, cam: &mut Camera) {
    for _ in 0..600 {
        ctl.update(cam, DT);
    }
}

#[test]
fn spherical_round_trips_offsets() {
    for offset in [
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-3.0, 0.5, -0.2),
    ] {
        let s = Spherical::from_offset(offset);
        assert!((s.to_offset() - offset).length() < 1e-5, "{offset:?}");
    }
}

#[test]
fn damping_alpha_matches_factor_at_reference_rate() {
    assert!((damping_alpha(0.25, DT) - 0.25).abs() < 1e-5);
    assert_eq!(damping_alpha(0.25, 0.0), 0.0);
    // Two half-length frames compound to one full frame.
    let half = damping_alpha(0.25, DT / 2.0);
    let combined = 1.0 - (1.0 - half) * (1.0 - half);
    assert!((combined - 0.25).abs() < 1e-5);
}

#[test]
fn input_is_ignored_while_disabled() {
    let (mut ctl, mut cam) = framed();
    assert!(!ctl.enabled());
    ctl.rotate(Vec2::new(300.0, 120.0), 800.0);
    ctl.dolly(2.0);
    ctl.pan(Vec2::new(50.0, 50.0), 800.0, &cam);
    assert!(!ctl.is_settling());
    let before = cam.eye;
    settle(&mut ctl, &mut cam);
    assert!((cam.eye - before).length() < 1e-5);
}

#[test]
fn rotation_is_damped_over_several_frames() {
    let (mut ctl, mut cam) = framed();
    ctl.set_enabled(true);
    ctl.rotate(Vec2::new(100.0, 0.0), 800.0);
    let start = Spherical::from_offset(cam.eye).theta;

    ctl.update(&mut cam, DT);
    let after_one = Spherical::from_offset(cam.eye).theta;
    assert!(ctl.is_settling());

    settle(&mut ctl, &mut cam);
    let end = Spherical::from_offset(cam.eye).theta;
    let total = end - start;
    let first = after_one - start;
    assert!(total.abs() > 0.0);
    assert!((first / total - 0.25).abs() < 1e-3, "first step {first}, total {total}");
    // Dragging right turns the camera towards -theta.
    assert!(total < 0.0);
    assert!(!ctl.is_settling());
}

#[test]
fn polar_angle_never_leaves_bounds() {
    let (mut ctl, mut cam) = framed();
    ctl.set_enabled(true);
    for dy in [5000.0, -5000.0] {
        ctl.rotate(Vec2::new(0.0, dy), 400.0);
        settle(&mut ctl, &mut cam);
        let phi = Spherical::from_offset(cam.eye - ctl.target()).phi;
        assert!(phi >= 0.2 * PI - 1e-4, "phi {phi} under lower bound");
        assert!(phi <= 0.7 * PI + 1e-4, "phi {phi} over upper bound");
    }
}

#[test]
fn distance_is_clamped_to_bounds() {
    let (mut ctl, mut cam) = framed();
    let [min, max] = ctl.distance_bounds();
    ctl.set_enabled(true);
    for _ in 0..50 {
        ctl.dolly(2.0);
        ctl.update(&mut cam, DT);
    }
    assert!((cam.distance_to_target() - min).abs() < 1e-4);
    for _ in 0..50 {
        ctl.dolly(0.5);
        ctl.update(&mut cam, DT);
    }
    assert!((cam.distance_to_target() - max).abs() < 1e-4);
}

#[test]
fn azimuth_restriction_limits_yaw_to_front_half_turn() {
    let (mut ctl, mut cam) = framed();
    ctl.set_azimuth_bounds(Some([-PI / 2.0, PI / 2.0]));
    ctl.set_enabled(true);
    ctl.rotate(Vec2::new(-4000.0, 0.0), 400.0);
    settle(&mut ctl, &mut cam);
    let theta = Spherical::from_offset(cam.eye).theta;
    assert!((theta - PI / 2.0).abs() < 1e-3, "theta {theta}");
    assert!(cam.eye.z >= -1e-3, "camera went behind the model: {:?}", cam.eye);
}

#[test]
fn yaw_is_unbounded_without_restriction() {
    let (mut ctl, mut cam) = framed();
    ctl.set_enabled(true);
    // Half a viewport height of drag is a half turn.
    ctl.rotate(Vec2::new(-200.0, 0.0), 400.0);
    settle(&mut ctl, &mut cam);
    assert!(cam.eye.z < 0.0, "expected camera behind the model, got {:?}", cam.eye);
}

#[test]
fn pan_moves_target_and_reset_returns_it() {
    let (mut ctl, mut cam) = framed();
    ctl.set_enabled(true);
    ctl.pan(Vec2::new(100.0, 0.0), 800.0, &cam);
    settle(&mut ctl, &mut cam);
    assert!(ctl.target().x < 0.0, "target {:?}", ctl.target());
    assert_eq!(cam.target, ctl.target());

    ctl.reset();
    assert_eq!(ctl.target(), Vec3::ZERO);
    assert!(!ctl.is_settling());
}

#[test]
fn bounds_setters_normalize_order() {
    let mut ctl = OrbitController::new();
    ctl.set_distance_bounds(5.0, 1.0);
    assert_eq!(ctl.distance_bounds(), [1.0, 5.0]);
    ctl.set_polar_bounds(2.0, 0.5);
    assert_eq!(ctl.polar_bounds(), [0.5, 2.0]);
    ctl.set_azimuth_bounds(Some([1.0, -1.0]));
    assert_eq!(ctl.azimuth_bounds(), Some([-1.0, 1.0]));
}
