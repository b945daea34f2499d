//! Head angles estimated from facial landmarks.
//!
//! Used when the detector reports landmarks but no transformation matrix.
//! Roll follows the eye line, yaw the nose's horizontal offset from the eye
//! midpoint and pitch its vertical offset below the eye line.

use crate::{
    config::LandmarkConfig,
    face_detection::NormalizedLandmark,
    pose_estimation::{AngleLimits, EulerAngles},
    utils::clamp_unit,
};

/// Landmark-based angle estimator
#[derive(Debug, Clone)]
pub struct MarkEstimator {
    config: LandmarkConfig,
}

impl MarkEstimator {
    #[must_use]
    pub const fn new(config: LandmarkConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &LandmarkConfig {
        &self.config
    }

    /// Estimate angles, scaling normalized yaw and pitch by the limits.
    ///
    /// Returns `None` when there are not enough landmarks for the configured
    /// indices.
    #[must_use]
    pub fn estimate(&self, landmarks: &[NormalizedLandmark], limits: &AngleLimits) -> Option<EulerAngles> {
        if landmarks.len() < self.config.required_landmarks() {
            return None;
        }

        let left = landmarks[self.config.left_eye];
        let right = landmarks[self.config.right_eye];
        let nose = landmarks[self.config.nose];

        let roll = -(right.y - left.y).atan2(right.x - left.x).to_degrees();

        let mid_x = 0.5 * (left.x + right.x);
        let yaw_norm = clamp_unit((nose.x - mid_x) / self.config.yaw_span);

        let mid_y = 0.5 * (left.y + right.y);
        let pitch_norm = clamp_unit((mid_y - nose.y) / self.config.pitch_span);

        Some(EulerAngles::new(
            pitch_norm * limits.pitch_max,
            yaw_norm * limits.yaw_max,
            roll,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: AngleLimits = AngleLimits {
        yaw_max: 30.0,
        pitch_max: 20.0,
        roll_max: 15.0,
    };

    fn face(left: (f32, f32), right: (f32, f32), nose: (f32, f32)) -> Vec<NormalizedLandmark> {
        let mut marks = vec![NormalizedLandmark::default(); 468];
        marks[33] = NormalizedLandmark::new(left.0, left.1, 0.0);
        marks[263] = NormalizedLandmark::new(right.0, right.1, 0.0);
        marks[1] = NormalizedLandmark::new(nose.0, nose.1, 0.0);
        marks
    }

    #[test]
    fn test_level_centered_face() {
        let estimator = MarkEstimator::new(LandmarkConfig::default());
        let angles = estimator
            .estimate(&face((0.4, 0.4), (0.6, 0.4), (0.5, 0.4)), &LIMITS)
            .unwrap();
        assert!(angles.roll.abs() < 1e-4);
        assert!(angles.yaw.abs() < 1e-4);
        assert!(angles.pitch.abs() < 1e-4);
    }

    #[test]
    fn test_nose_offset_maps_to_yaw_and_pitch() {
        let estimator = MarkEstimator::new(LandmarkConfig::default());
        // Nose 0.1 right of center => yaw_norm 0.5; nose 0.3 above eye line => pitch_norm clamps to 1
        let angles = estimator
            .estimate(&face((0.4, 0.5), (0.6, 0.5), (0.6, 0.2)), &LIMITS)
            .unwrap();
        assert!((angles.yaw - 15.0).abs() < 1e-3);
        assert!((angles.pitch - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_tilted_eye_line_gives_roll() {
        let estimator = MarkEstimator::new(LandmarkConfig::default());
        let angles = estimator
            .estimate(&face((0.4, 0.4), (0.6, 0.6), (0.5, 0.5)), &LIMITS)
            .unwrap();
        assert!((angles.roll + 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_too_few_landmarks() {
        let estimator = MarkEstimator::new(LandmarkConfig::default());
        let marks = vec![NormalizedLandmark::default(); 263];
        assert!(estimator.estimate(&marks, &LIMITS).is_none());
    }
}
