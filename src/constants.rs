//! Constants used throughout the library

/// Squared magnitude below which an orientation vector is treated as missing
pub const MIN_AXIS_SQR_MAGNITUDE: f32 = 1e-6;

/// Floor applied to angle limits before dividing by them
pub const MIN_ANGLE_LIMIT_DEG: f32 = 1e-3;

/// Floor applied to the depth range before dividing by it
pub const MIN_DEPTH_RANGE_Z: f32 = 1e-4;

/// Epsilon passed to quaternion slerp before falling back to nlerp
pub const SLERP_EPSILON: f32 = 1e-6;

/// Default frames per second for trace replay
pub const DEFAULT_FPS: f32 = 30.0;

/// Rotation limits accepted by the configuration (degrees)
pub const YAW_LIMIT_RANGE: (f32, f32) = (0.0, 90.0);
pub const PITCH_LIMIT_RANGE: (f32, f32) = (0.0, 60.0);
pub const ROLL_LIMIT_RANGE: (f32, f32) = (0.0, 60.0);

/// Depth smoothing bounds accepted by the configuration
pub const DEPTH_EMA_ALPHA_RANGE: (f32, f32) = (0.01, 1.0);
pub const DEPTH_DEADZONE_RANGE: (f32, f32) = (0.0, 0.2);

/// MediaPipe face mesh landmark indices used by the fallback estimator
pub const LEFT_EYE_LANDMARK: usize = 33;
pub const RIGHT_EYE_LANDMARK: usize = 263;
pub const NOSE_TIP_LANDMARK: usize = 1;

/// Animation clip names the wander behavior asks the host to play
pub const IDLE_CLIP: &str = "idle";
pub const WALK_CLIP: &str = "walk";
