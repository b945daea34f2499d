//! Detector and render loop running on separate threads


use head_pose_rig::{
    config::Config,
    pose_estimation::EulerAngles,
    pose_filter::PoseFilter,
    rig::{CameraRig, Transform},
    shared::PoseTargets,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use test_helpers::sample_from_angles;

#[test]
fn test_detector_and_render_threads_share_targets() {
    let config = Config::default();
    let targets = PoseTargets::new();
    let mut filter = PoseFilter::new(&config, Arc::clone(&targets)).unwrap();
    let rig = CameraRig::new(Transform::default(), Arc::clone(&targets), config.rig.clone()).unwrap();
    let done = AtomicBool::new(false);

    let camera = thread::scope(|s| {
        s.spawn(|| {
            for i in 0..2000 {
                let yaw = if i % 2 == 0 { 25.0 } else { -25.0 };
                filter.on_pose_sample(sample_from_angles(0.0, yaw, 0.0, 0.1));
                if i == 1000 {
                    filter.recalibrate();
                }
            }
            done.store(true, Ordering::Release);
        });

        let render = s.spawn(|| {
            let mut camera = Transform::default();
            while !done.load(Ordering::Acquire) {
                rig.tick(&mut camera, 1.0 / 120.0);
                let snapshot = targets.snapshot();
                assert!(snapshot.angles.yaw.abs() <= config.pose.yaw_max);
                assert!(snapshot.parallax_x.abs() <= config.pose.parallax_x.abs() + 1e-6);
                assert!(camera.position.x.abs() <= config.rig.half_size);
                thread::yield_now();
            }
            camera
        });
        render.join().unwrap()
    });

    assert!(camera.position.iter().all(|c| c.is_finite()));
    // The last sample had yaw -25
    let last = targets.snapshot();
    assert!((last.angles.yaw + 25.0).abs() < 1e-3);
    assert!(!targets.is_recalibration_requested());
}

#[test]
fn test_recalibration_from_another_thread() {
    let targets = PoseTargets::new();
    let mut filter = PoseFilter::new(&Config::default(), Arc::clone(&targets)).unwrap();
    filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.10));

    let ui = Arc::clone(&targets);
    thread::spawn(move || ui.request_recalibration()).join().unwrap();
    assert!(targets.is_recalibration_requested());

    filter.on_pose_sample(sample_from_angles(0.0, 0.0, 0.0, 0.04));
    assert_eq!(filter.depth().baseline_z(), Some(0.04));
    assert!(!targets.is_recalibration_requested());
}

#[test]
fn test_render_side_reads_defaults_before_any_sample() {
    let targets = PoseTargets::new();
    let snapshot = thread::spawn(move || targets.snapshot()).join().unwrap();
    assert_eq!(snapshot.angles, EulerAngles::ZERO);
    assert_eq!(snapshot.parallax_x, 0.0);
    assert_eq!(snapshot.dolly_z, 0.0);
}
