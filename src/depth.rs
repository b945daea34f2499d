//! Depth (dolly) signal from the pose matrix translation.
//!
//! Depth is measured against a baseline translation captured from the first
//! sample, or the first sample after a recalibration. The normalized value
//! goes through a deadzone, a `[-1, 1]` clamp and an optional sign flip
//! before the EMA. The pitch fallback feeds the same accumulator.

use crate::{
    config::DepthConfig,
    constants::MIN_DEPTH_RANGE_Z,
    filters::{deadzone::Deadzone, exponential::ExponentialSmoother, ScalarFilter},
    utils::clamp_unit,
};
use log::info;

/// Baseline tracking and smoothing for the depth signal
#[derive(Debug, Clone)]
pub struct DepthEstimator {
    config: DepthConfig,
    baseline_z: Option<f32>,
    deadzone: Deadzone,
    ema: ExponentialSmoother,
}

impl DepthEstimator {
    /// Create an uncalibrated estimator
    ///
    /// # Panics
    ///
    /// Panics if the EMA alpha or deadzone is out of range; validate the
    /// configuration first.
    #[must_use]
    pub fn new(config: DepthConfig) -> Self {
        Self {
            deadzone: Deadzone::new(config.depth_deadzone),
            ema: ExponentialSmoother::new(config.depth_ema_alpha),
            baseline_z: None,
            config,
        }
    }

    /// Check if a baseline has been captured
    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        self.baseline_z.is_some()
    }

    /// Captured baseline translation, if any
    #[must_use]
    pub const fn baseline_z(&self) -> Option<f32> {
        self.baseline_z
    }

    /// Current smoothed depth in `[-1, 1]`
    #[must_use]
    pub const fn smoothed(&self) -> f32 {
        self.ema.value()
    }

    #[must_use]
    pub const fn config(&self) -> &DepthConfig {
        &self.config
    }

    /// Forget the baseline; the next translation sample becomes the new one
    pub fn recalibrate(&mut self) {
        info!("Depth baseline cleared, re-anchoring on next sample");
        self.baseline_z = None;
    }

    /// Normalized, deadzoned, clamped and optionally inverted depth before smoothing
    #[must_use]
    pub fn normalize(&self, baseline_z: f32, translation_z: f32) -> f32 {
        let raw = (baseline_z - translation_z) / self.config.depth_range_z.max(MIN_DEPTH_RANGE_Z);
        let raw = clamp_unit(self.deadzone.filter(raw));
        if self.config.invert_depth {
            -raw
        } else {
            raw
        }
    }

    /// Update from a translation sample and return the smoothed depth
    pub fn update_from_translation(&mut self, translation_z: f32) -> f32 {
        let baseline = *self.baseline_z.get_or_insert_with(|| {
            info!("Depth baseline anchored at z={translation_z:.4}");
            translation_z
        });
        let normalized = self.normalize(baseline, translation_z);
        self.ema.apply(normalized)
    }

    /// Update from a normalized pitch and return the smoothed depth.
    ///
    /// Looking down (positive pitch) moves forward, i.e. negative depth.
    pub fn update_from_pitch(&mut self, pitch_norm: f32) -> f32 {
        self.ema.apply(-clamp_unit(pitch_norm))
    }
}
