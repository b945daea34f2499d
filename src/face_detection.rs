//! Face detector results as delivered by the landmark plugin.
//!
//! The detector itself runs outside this crate. These are plain value types
//! mirroring what it reports per frame: zero or more facial transformation
//! matrices and zero or more lists of normalized landmarks, one per face.

use crate::pose_estimation::PoseSample;
use nalgebra::Matrix4;

/// One landmark in normalized image coordinates (0..1)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl NormalizedLandmark {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Detector output for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionResult {
    /// Face pose matrices, one per detected face
    pub facial_transformation_matrices: Vec<Matrix4<f32>>,
    /// Landmark lists, one per detected face
    pub face_landmarks: Vec<Vec<NormalizedLandmark>>,
}

impl DetectionResult {
    /// Result carrying a single pose matrix
    #[must_use]
    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        Self {
            facial_transformation_matrices: vec![matrix],
            face_landmarks: Vec::new(),
        }
    }

    /// Result carrying a single landmark list
    #[must_use]
    pub fn from_landmarks(landmarks: Vec<NormalizedLandmark>) -> Self {
        Self {
            facial_transformation_matrices: Vec::new(),
            face_landmarks: vec![landmarks],
        }
    }

    /// True when no face was reported at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facial_transformation_matrices.is_empty() && self.face_landmarks.is_empty()
    }

    /// Pose sample of the first face, if a matrix was reported
    #[must_use]
    pub fn first_pose(&self) -> Option<PoseSample> {
        self.facial_transformation_matrices.first().map(PoseSample::from_matrix)
    }

    /// Landmarks of the first face, if any were reported
    #[must_use]
    pub fn first_landmarks(&self) -> Option<&[NormalizedLandmark]> {
        self.face_landmarks.first().map(Vec::as_slice)
    }
}
