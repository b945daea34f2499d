//! Targets shared between the detector callback and the render loop.
//!
//! The detector writes new targets whenever a face pose arrives; the render
//! loop reads them once per frame. Each scalar is its own atomic cell, so a
//! reader never sees a torn value, but a snapshot may mix fields from two
//! different detections. Every field converges on its own, so that is fine.

use crate::pose_estimation::EulerAngles;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// `f32` stored as raw bits in an `AtomicU32`
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Read the current value
    pub fn load(&self) -> f32 {
        // Fields are independent; no ordering with other memory is needed.
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Replace the current value
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Latest filtered targets plus the recalibration request flag
#[derive(Debug, Default)]
pub struct PoseTargets {
    yaw_deg: AtomicF32,
    pitch_deg: AtomicF32,
    roll_deg: AtomicF32,
    parallax_x: AtomicF32,
    dolly_z: AtomicF32,

    /// Set by any caller; consumed by the next pose sample.
    recalibrate_requested: AtomicBool,
}

/// Plain copy of the targets taken at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetSnapshot {
    /// Clamped head angles in degrees
    pub angles: EulerAngles,
    /// Lateral offset
    pub parallax_x: f32,
    /// Forward/backward offset
    pub dolly_z: f32,
}

impl PoseTargets {
    /// Create zeroed targets ready to be shared
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Publish new head angles
    pub fn set_angles(&self, angles: EulerAngles) {
        self.yaw_deg.store(angles.yaw);
        self.pitch_deg.store(angles.pitch);
        self.roll_deg.store(angles.roll);
    }

    /// Publish a new lateral offset
    pub fn set_parallax_x(&self, value: f32) {
        self.parallax_x.store(value);
    }

    /// Publish a new forward/backward offset
    pub fn set_dolly_z(&self, value: f32) {
        self.dolly_z.store(value);
    }

    /// Read every field once
    pub fn snapshot(&self) -> TargetSnapshot {
        TargetSnapshot {
            angles: EulerAngles::new(self.pitch_deg.load(), self.yaw_deg.load(), self.roll_deg.load()),
            parallax_x: self.parallax_x.load(),
            dolly_z: self.dolly_z.load(),
        }
    }

    /// Ask the filter to re-anchor its depth baseline on the next sample
    pub fn request_recalibration(&self) {
        self.recalibrate_requested.store(true, Ordering::Release);
    }

    /// Check whether a recalibration is pending
    pub fn is_recalibration_requested(&self) -> bool {
        self.recalibrate_requested.load(Ordering::Acquire)
    }

    /// Clear a pending recalibration request, returning whether one was set
    pub fn take_recalibration_request(&self) -> bool {
        self.recalibrate_requested.swap(false, Ordering::AcqRel)
    }
}
