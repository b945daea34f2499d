//! Head orientation from a face pose matrix.
//!
//! The detector reports one 4x4 transformation matrix per face. Its Z column
//! is the face's forward direction, its Y column the face's up direction and
//! entry (2, 3) the translation along the camera's depth axis. Euler angles
//! follow the Z-then-X-then-Y composition (`R = Ry * Rx * Rz`) with every
//! angle reported in degrees in `(-180, 180]`.

use crate::{
    constants::MIN_AXIS_SQR_MAGNITUDE,
    utils::{clamp_symmetric, is_finite_vector},
};
use nalgebra::{Matrix3, Matrix4, Rotation3, UnitQuaternion, Vector3};

/// One pose observation for a detected face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    /// Face forward direction (matrix column Z)
    pub forward: Vector3<f32>,
    /// Face up direction (matrix column Y)
    pub up: Vector3<f32>,
    /// Translation along the depth axis (matrix row 2, column 3)
    pub translation_z: f32,
}

impl PoseSample {
    /// Create a sample from its parts
    #[must_use]
    pub const fn new(forward: Vector3<f32>, up: Vector3<f32>, translation_z: f32) -> Self {
        Self {
            forward,
            up,
            translation_z,
        }
    }

    /// Extract forward, up and depth translation from a face pose matrix
    #[must_use]
    pub fn from_matrix(m: &Matrix4<f32>) -> Self {
        Self {
            forward: Vector3::new(m[(0, 2)], m[(1, 2)], m[(2, 2)]),
            up: Vector3::new(m[(0, 1)], m[(1, 1)], m[(2, 1)]),
            translation_z: m[(2, 3)],
        }
    }

    /// False when any component is NaN or infinite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        is_finite_vector(&self.forward) && is_finite_vector(&self.up) && self.translation_z.is_finite()
    }

    /// Orientation of the face, tolerant of zero-length axes
    #[must_use]
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        safe_look_rotation(self.forward, self.up)
    }
}

/// Pitch (X), yaw (Y) and roll (Z) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    /// Rotation around the lateral axis
    pub pitch: f32,
    /// Rotation around the vertical axis
    pub yaw: f32,
    /// Rotation around the forward axis
    pub roll: f32,
}

impl EulerAngles {
    /// All angles zero
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    #[must_use]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Clamp each axis into `[-max, max]` of the matching limit
    #[must_use]
    pub fn clamped(self, limits: &AngleLimits) -> Self {
        Self {
            pitch: clamp_symmetric(self.pitch, limits.pitch_max),
            yaw: clamp_symmetric(self.yaw, limits.yaw_max),
            roll: clamp_symmetric(self.roll, limits.roll_max),
        }
    }

    /// Multiply every axis by `factor`
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            pitch: self.pitch * factor,
            yaw: self.yaw * factor,
            roll: self.roll * factor,
        }
    }

    /// Rotation equivalent to these angles
    #[must_use]
    pub fn to_rotation(self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.pitch.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.roll.to_radians())
    }

    /// Angles of `rotation`, each normalized into `(-180, 180]`
    #[must_use]
    pub fn from_rotation(rotation: &UnitQuaternion<f32>) -> Self {
        let rot = rotation.to_rotation_matrix();
        let m = rot.matrix();

        let sin_pitch = (-m[(1, 2)]).clamp(-1.0, 1.0);
        let pitch = sin_pitch.asin();

        // Near +-90 degrees of pitch yaw and roll share an axis; fold it all into yaw.
        let (yaw, roll) = if sin_pitch.abs() < 0.999_99 {
            (m[(0, 2)].atan2(m[(2, 2)]), m[(1, 0)].atan2(m[(1, 1)]))
        } else {
            ((-m[(2, 0)]).atan2(m[(0, 0)]), 0.0)
        };

        Self {
            pitch: normalize_180(pitch.to_degrees()),
            yaw: normalize_180(yaw.to_degrees()),
            roll: normalize_180(roll.to_degrees()),
        }
    }
}

/// Per-axis rotation limits in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleLimits {
    pub yaw_max: f32,
    pub pitch_max: f32,
    pub roll_max: f32,
}

/// Wrap an angle in degrees into `(-180, 180]`
#[must_use]
pub fn normalize_180(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Rotation that maps +Z onto `forward` while keeping `up` as close to +Y as possible.
///
/// Axes shorter than the configured threshold fall back to `(0, 0, 1)` and
/// `(0, 1, 0)`. An `up` parallel to `forward` is replaced by another axis.
#[must_use]
pub fn safe_look_rotation(forward: Vector3<f32>, up: Vector3<f32>) -> UnitQuaternion<f32> {
    let forward = if forward.norm_squared() < MIN_AXIS_SQR_MAGNITUDE {
        Vector3::z()
    } else {
        forward.normalize()
    };
    let up = if up.norm_squared() < MIN_AXIS_SQR_MAGNITUDE {
        Vector3::y()
    } else {
        up.normalize()
    };

    let mut right = up.cross(&forward);
    if right.norm_squared() < MIN_AXIS_SQR_MAGNITUDE {
        let alternate = if forward.z.abs() < 0.9 { Vector3::z() } else { Vector3::x() };
        right = alternate.cross(&forward);
    }
    let right = right.normalize();
    let true_up = forward.cross(&right);

    let basis = Matrix3::from_columns(&[right, true_up, forward]);
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(basis))
}
