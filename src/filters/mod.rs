//! Scalar signal filters used to steady the depth signal.
//!
//! The depth estimator chains a [`deadzone::Deadzone`] in front of an
//! [`exponential::ExponentialSmoother`]; both are exposed on their own so
//! hosts can reuse them for other jittery channels.

/// Exponential moving average
pub mod exponential;

/// Deadzone that snaps small inputs to zero
pub mod deadzone;

/// Trait for single-channel filters
pub trait ScalarFilter: Send + Sync {
    /// Feed one value and return the filtered output
    fn apply(&mut self, value: f32) -> f32;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}
