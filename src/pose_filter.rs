//! Detector-side filter turning face poses into camera targets.
//!
//! Call [`PoseFilter::on_detection`] (or [`PoseFilter::on_pose_sample`])
//! from the detector callback. Each accepted sample publishes clamped
//! yaw/pitch/roll, a parallax offset and a dolly offset into the shared
//! [`PoseTargets`], where the render loop's [`crate::rig::CameraRig`] picks
//! them up.

use crate::{
    config::{Config, PoseConfig},
    constants::MIN_ANGLE_LIMIT_DEG,
    depth::DepthEstimator,
    face_detection::{DetectionResult, NormalizedLandmark},
    mark_detection::MarkEstimator,
    pose_estimation::{safe_look_rotation, EulerAngles, PoseSample},
    shared::{PoseTargets, TargetSnapshot},
    utils::normalized_ratio,
    Result,
};
use log::{debug, info};
use std::sync::Arc;

/// Where the depth signal of an update comes from
#[derive(Debug, Clone, Copy, PartialEq)]
enum DepthSource {
    Translation(f32),
    Pitch,
    /// Keep the current smoothed depth
    Hold,
}

/// Stateful per-sample pose filter
pub struct PoseFilter {
    pose: PoseConfig,
    depth: DepthEstimator,
    marks: Option<MarkEstimator>,
    targets: Arc<PoseTargets>,
}

impl PoseFilter {
    /// Create a filter publishing into `targets`
    ///
    /// # Errors
    ///
    /// Returns an error if the pose, depth or landmark section is out of range
    pub fn new(config: &Config, targets: Arc<PoseTargets>) -> Result<Self> {
        config.pose.validate()?;
        config.depth.validate()?;
        config.landmarks.validate()?;

        info!(
            "Initializing PoseFilter: yaw_max={} pitch_max={} roll_max={} depth_from_matrix={}",
            config.pose.yaw_max, config.pose.pitch_max, config.pose.roll_max, config.depth.use_depth_from_matrix
        );

        Ok(Self {
            pose: config.pose.clone(),
            depth: DepthEstimator::new(config.depth.clone()),
            marks: config
                .landmarks
                .enabled
                .then(|| MarkEstimator::new(config.landmarks.clone())),
            targets,
        })
    }

    /// Shared targets this filter publishes into
    #[must_use]
    pub const fn targets(&self) -> &Arc<PoseTargets> {
        &self.targets
    }

    /// Depth baseline and smoothing state
    #[must_use]
    pub const fn depth(&self) -> &DepthEstimator {
        &self.depth
    }

    /// Re-anchor the depth baseline on the next sample
    pub fn recalibrate(&self) {
        self.targets.request_recalibration();
    }

    /// Handle one detector result.
    ///
    /// Uses the first face's matrix when present, otherwise the first face's
    /// landmarks when the fallback is enabled. Anything else leaves the
    /// targets untouched and returns `None`.
    pub fn on_detection(&mut self, result: &DetectionResult) -> Option<TargetSnapshot> {
        if let Some(sample) = result.first_pose() {
            return self.on_pose_sample(sample);
        }

        if self.marks.is_some() {
            if let Some(landmarks) = result.first_landmarks() {
                return self.on_landmarks(landmarks);
            }
        }

        debug!("No face in detection result, keeping previous targets");
        None
    }

    /// Handle one pose sample; non-finite samples are ignored
    pub fn on_pose_sample(&mut self, sample: PoseSample) -> Option<TargetSnapshot> {
        if !sample.is_finite() {
            debug!("Ignoring non-finite pose sample");
            return None;
        }

        let mut forward = sample.forward;
        if self.pose.mirror_forward_x {
            forward.x = -forward.x;
        }
        let angles = EulerAngles::from_rotation(&safe_look_rotation(forward, sample.up));

        let source = if self.depth.config().use_depth_from_matrix {
            DepthSource::Translation(sample.translation_z)
        } else {
            DepthSource::Pitch
        };
        Some(self.publish(angles, source))
    }

    /// Handle one face's landmarks; too few landmarks are ignored.
    ///
    /// Landmarks carry no translation. With depth taken from the matrix the
    /// dolly holds its current value and a pending recalibration waits for
    /// the next matrix sample; otherwise depth follows pitch as usual.
    pub fn on_landmarks(&mut self, landmarks: &[NormalizedLandmark]) -> Option<TargetSnapshot> {
        let Some(estimator) = &self.marks else {
            return None;
        };
        let Some(angles) = estimator.estimate(landmarks, &self.pose.limits()) else {
            debug!(
                "Ignoring face with {} landmarks, need {}",
                landmarks.len(),
                estimator.config().required_landmarks()
            );
            return None;
        };
        if !(angles.pitch.is_finite() && angles.yaw.is_finite() && angles.roll.is_finite()) {
            debug!("Ignoring non-finite landmark estimate");
            return None;
        }
        let source = if self.depth.config().use_depth_from_matrix {
            DepthSource::Hold
        } else {
            DepthSource::Pitch
        };
        Some(self.publish(angles, source))
    }

    fn publish(&mut self, angles: EulerAngles, source: DepthSource) -> TargetSnapshot {
        if source != DepthSource::Hold && self.targets.take_recalibration_request() {
            self.depth.recalibrate();
        }

        let angles = angles.clamped(&self.pose.limits());
        let yaw_norm = normalized_ratio(angles.yaw, self.pose.yaw_max, MIN_ANGLE_LIMIT_DEG);
        let parallax_x = yaw_norm * self.pose.parallax_x;

        let depth = match source {
            DepthSource::Translation(z) => self.depth.update_from_translation(z),
            DepthSource::Pitch => {
                let pitch_norm = normalized_ratio(angles.pitch, self.pose.pitch_max, MIN_ANGLE_LIMIT_DEG);
                self.depth.update_from_pitch(pitch_norm)
            }
            DepthSource::Hold => self.depth.smoothed(),
        };
        let dolly_z = depth * self.pose.dolly_z_max;

        self.targets.set_angles(angles);
        self.targets.set_parallax_x(parallax_x);
        self.targets.set_dolly_z(dolly_z);

        TargetSnapshot {
            angles,
            parallax_x,
            dolly_z,
        }
    }
}
