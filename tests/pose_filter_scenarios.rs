//! End-to-end behavior of the pose filter and camera rig


use head_pose_rig::{
    config::{Config, RotationSign},
    face_detection::{DetectionResult, NormalizedLandmark},
    pose_estimation::{EulerAngles, PoseSample},
};
use nalgebra::Vector3;
use proptest::prelude::*;
use test_helpers::{assert_close, create_filter_and_rig, matrix_from_angles, sample_from_angles};

#[test]
fn test_yaw_beyond_limit_is_clamped_with_full_parallax() {
    let mut config = Config::default();
    config.pose.yaw_max = 30.0;
    config.pose.parallax_x = 0.4;
    let (mut filter, _rig) = create_filter_and_rig(&config);

    let out = filter.on_pose_sample(sample_from_angles(0.0, 45.0, 0.0, 0.1)).unwrap();
    assert_close(out.angles.yaw, 30.0, 1e-4);
    assert_close(out.parallax_x, 0.4, 1e-6);
}

#[test]
fn test_depth_ema_first_step() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());

    filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.10));
    let out = filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.06)).unwrap();

    assert_close(filter.depth().smoothed(), 0.075, 1e-5);
    assert_close(out.dolly_z, 0.075 * 2.5, 1e-4);
}

#[test]
fn test_zero_length_axes_use_default_orientation() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());

    let out = filter
        .on_pose_sample(PoseSample::new(Vector3::zeros(), Vector3::zeros(), 0.1))
        .unwrap();
    assert_close(out.angles.yaw, 0.0, 1e-5);
    assert_close(out.angles.pitch, 0.0, 1e-5);
    assert_close(out.angles.roll, 0.0, 1e-5);
}

#[test]
fn test_repeated_sample_reaches_fixed_point_immediately() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());
    let sample = sample_from_angles(8.0, -12.0, 4.0, 0.1);

    let first = filter.on_pose_sample(sample).unwrap();
    for _ in 0..10 {
        let again = filter.on_pose_sample(sample).unwrap();
        assert_eq!(again.angles, first.angles);
        assert_eq!(again.parallax_x, first.parallax_x);
    }
    assert_close(first.angles.pitch, 8.0, 1e-3);
    assert_close(first.angles.yaw, -12.0, 1e-3);
    assert_close(first.angles.roll, 4.0, 1e-3);
}

#[test]
fn test_depth_converges_geometrically_without_overshoot() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());
    filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.10));

    let steady = 0.5;
    let mut gap = steady;
    for _ in 0..60 {
        filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.06));
        let ema = filter.depth().smoothed();
        assert!(ema <= steady + 1e-6, "overshoot: {ema}");
        let new_gap = steady - ema;
        assert!(new_gap <= gap * 0.85 + 1e-5);
        gap = new_gap;
    }
    assert!(gap < 1e-3);
}

#[test]
fn test_recalibration_resets_to_neutral_depth() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());
    filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.10));
    for _ in 0..100 {
        filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.06));
    }
    let before = filter.depth().smoothed();

    filter.recalibrate();
    filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.06));
    assert_eq!(filter.depth().baseline_z(), Some(0.06));
    // raw is 0 against the new baseline
    assert_close(filter.depth().smoothed(), before * 0.85, 1e-5);

    for _ in 0..100 {
        filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.06));
    }
    assert!(filter.depth().smoothed().abs() < 1e-4);
}

#[test]
fn test_detection_matrix_drives_camera() {
    let mut config = Config::default();
    config.rig.rotation_sign = RotationSign::Direct;
    let (mut filter, rig) = create_filter_and_rig(&config);

    let result = DetectionResult::from_matrix(matrix_from_angles(0.0, 20.0, 0.0, 0.1));
    filter.on_detection(&result).unwrap();

    let mut camera = rig.base().clone();
    for _ in 0..120 {
        rig.tick(&mut camera, 1.0 / 60.0);
    }
    let angles = EulerAngles::from_rotation(&camera.rotation);
    assert_close(angles.yaw, 20.0, 0.05);
    assert_close(camera.position.x, 20.0 / 30.0 * 0.3, 1e-3);
}

#[test]
fn test_landmark_fallback_when_no_matrix() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());

    let mut marks = vec![NormalizedLandmark::default(); 468];
    marks[33] = NormalizedLandmark::new(0.4, 0.5, 0.0);
    marks[263] = NormalizedLandmark::new(0.6, 0.5, 0.0);
    marks[1] = NormalizedLandmark::new(0.45, 0.5, 0.0);

    let out = filter.on_detection(&DetectionResult::from_landmarks(marks)).unwrap();
    // nose 0.05 left of center => yaw_norm -0.25
    assert_close(out.angles.yaw, -7.5, 1e-3);
    assert_close(out.parallax_x, -0.075, 1e-4);
    assert!(!filter.depth().is_calibrated());
}

fn nose_below_eyes() -> Vec<NormalizedLandmark> {
    let mut marks = vec![NormalizedLandmark::default(); 468];
    marks[33] = NormalizedLandmark::new(0.4, 0.5, 0.0);
    marks[263] = NormalizedLandmark::new(0.6, 0.5, 0.0);
    marks[1] = NormalizedLandmark::new(0.5, 0.65, 0.0);
    marks
}

#[test]
fn test_landmark_frames_do_not_disturb_matrix_depth() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());
    for _ in 0..50 {
        filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.10));
    }
    assert_eq!(filter.targets().snapshot().dolly_z, 0.0);

    let out = filter.on_detection(&DetectionResult::from_landmarks(nose_below_eyes())).unwrap();
    assert_eq!(out.dolly_z, 0.0);
    assert_eq!(filter.depth().smoothed(), 0.0);
    assert_eq!(filter.depth().baseline_z(), Some(0.10));
}

#[test]
fn test_recalibration_waits_for_matrix_sample() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());
    filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.10));
    for _ in 0..100 {
        filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.06));
    }
    let settled = filter.depth().smoothed();

    filter.recalibrate();
    let out = filter.on_detection(&DetectionResult::from_landmarks(nose_below_eyes())).unwrap();
    assert_close(out.dolly_z, settled * 2.5, 1e-5);
    assert!(filter.targets().is_recalibration_requested());
    assert_eq!(filter.depth().baseline_z(), Some(0.10));

    filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.06));
    assert_eq!(filter.depth().baseline_z(), Some(0.06));
    assert!(!filter.targets().is_recalibration_requested());
    // raw is 0 against the new baseline
    assert_close(filter.depth().smoothed(), settled * 0.85, 1e-5);
}

#[test]
fn test_no_face_keeps_previous_targets() {
    let (mut filter, _rig) = create_filter_and_rig(&Config::default());
    filter.on_pose_sample(sample_from_angles(5.0, 10.0, 0.0, 0.1));
    let before = filter.targets().snapshot();

    assert!(filter.on_detection(&DetectionResult::default()).is_none());
    assert!(filter
        .on_detection(&DetectionResult::from_landmarks(vec![NormalizedLandmark::default(); 5]))
        .is_none());
    assert_eq!(filter.targets().snapshot(), before);
}

proptest! {
    #[test]
    fn prop_angles_always_within_limits(
        pitch in -180.0f32..180.0,
        yaw in -180.0f32..180.0,
        roll in -180.0f32..180.0,
        yaw_max in 0.0f32..=90.0,
        pitch_max in 0.0f32..=60.0,
        roll_max in 0.0f32..=60.0,
    ) {
        let mut config = Config::default();
        config.pose.yaw_max = yaw_max;
        config.pose.pitch_max = pitch_max;
        config.pose.roll_max = roll_max;
        let (mut filter, _rig) = create_filter_and_rig(&config);

        let out = filter.on_pose_sample(sample_from_angles(pitch, yaw, roll, 0.1)).unwrap();
        prop_assert!(out.angles.yaw.abs() <= yaw_max);
        prop_assert!(out.angles.pitch.abs() <= pitch_max);
        prop_assert!(out.angles.roll.abs() <= roll_max);
    }

    #[test]
    fn prop_position_stays_inside_boundary(
        parallax in -50.0f32..50.0,
        dolly in -50.0f32..50.0,
        yaw in -90.0f32..90.0,
        depths in proptest::collection::vec(-5.0f32..5.0, 1..40),
    ) {
        let mut config = Config::default();
        config.pose.parallax_x = parallax;
        config.pose.dolly_z_max = dolly;
        let (mut filter, rig) = create_filter_and_rig(&config);
        let half = config.rig.half_size;

        let mut camera = rig.base().clone();
        for z in depths {
            filter.on_pose_sample(sample_from_angles(0.0, yaw, 0.0, z));
            rig.tick(&mut camera, 1.0 / 30.0);
            prop_assert!(camera.position.x.abs() <= half);
            prop_assert!(camera.position.z.abs() <= half);
        }
    }

    #[test]
    fn prop_normalized_depth_in_unit_range(
        baseline in -10.0f32..10.0,
        z in -10.0f32..10.0,
        invert in any::<bool>(),
    ) {
        let mut config = Config::default();
        config.depth.invert_depth = invert;
        let (filter, _rig) = create_filter_and_rig(&config);

        let n = filter.depth().normalize(baseline, z);
        prop_assert!((-1.0..=1.0).contains(&n));
        let raw = (baseline - z) / config.depth.depth_range_z;
        if raw.abs() < config.depth.depth_deadzone {
            prop_assert_eq!(n, 0.0);
        }
    }
}
