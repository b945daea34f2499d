//! Configuration management for the head pose rig

use crate::{
    constants::{
        DEPTH_DEADZONE_RANGE, DEPTH_EMA_ALPHA_RANGE, LEFT_EYE_LANDMARK, NOSE_TIP_LANDMARK, PITCH_LIMIT_RANGE,
        RIGHT_EYE_LANDMARK, ROLL_LIMIT_RANGE, YAW_LIMIT_RANGE,
    },
    pose_estimation::AngleLimits,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rotation limits, parallax and dolly scale
    pub pose: PoseConfig,

    /// Depth (dolly) signal extraction
    pub depth: DepthConfig,

    /// Per-frame interpolation of the controlled transform
    pub rig: RigConfig,

    /// Landmark-based fallback when no pose matrix is reported
    pub landmarks: LandmarkConfig,

    /// Wandering animal behavior
    pub wander: WanderConfig,
}

/// Rotation clamp and positional offsets derived from head pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    /// Maximum yaw in degrees (0-90)
    pub yaw_max: f32,

    /// Maximum pitch in degrees (0-60)
    pub pitch_max: f32,

    /// Maximum roll in degrees (0-60)
    pub roll_max: f32,

    /// Lateral offset at full yaw
    pub parallax_x: f32,

    /// Forward/backward offset at full depth
    pub dolly_z_max: f32,

    /// Negate forward.x before extracting orientation (mirrored webcams)
    pub mirror_forward_x: bool,
}

/// Depth signal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    /// Use the matrix translation for depth; otherwise pitch drives the dolly
    pub use_depth_from_matrix: bool,

    /// Translation change mapped to full dolly (must be positive)
    pub depth_range_z: f32,

    /// Flip the sign of the normalized depth
    pub invert_depth: bool,

    /// EMA blend factor (0.01-1)
    pub depth_ema_alpha: f32,

    /// Normalized depth below this magnitude snaps to zero (0-0.2)
    pub depth_deadzone: f32,
}

/// Sign applied to pitch, yaw and roll before composing with the base rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationSign {
    /// Follow the head
    Direct,
    /// Mirror the head
    Negated,
}

impl RotationSign {
    /// Multiplier for this convention
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Direct => 1.0,
            Self::Negated => -1.0,
        }
    }
}

/// How the per-frame blend factor is derived from elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// `clamp(dt * rate, 0, 1)`; frame-rate dependent
    Linear,
    /// `1 - exp(-rate * dt)`; frame-rate independent
    Exponential,
}

impl BlendMode {
    /// Fraction of the remaining distance to cover this frame
    #[must_use]
    pub fn factor(self, rate: f32, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        match self {
            Self::Linear => (dt * rate).clamp(0.0, 1.0),
            Self::Exponential => (1.0 - (-rate * dt).exp()).clamp(0.0, 1.0),
        }
    }
}

/// Camera rig interpolation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Rotation catch-up rate
    pub rot_lerp: f32,

    /// Position catch-up rate
    pub pos_lerp: f32,

    /// Half extent of the square X/Z boundary
    pub half_size: f32,

    /// Sign convention for composing the head rotation
    pub rotation_sign: RotationSign,

    /// Blend factor derivation
    pub blend: BlendMode,
}

/// Landmark fallback configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkConfig {
    /// Estimate pose from landmarks when no matrix is available
    pub enabled: bool,

    /// Index of the left eye corner landmark
    pub left_eye: usize,

    /// Index of the right eye corner landmark
    pub right_eye: usize,

    /// Index of the nose tip landmark
    pub nose: usize,

    /// Horizontal nose offset (normalized image units) mapped to full yaw
    pub yaw_span: f32,

    /// Vertical nose offset (normalized image units) mapped to full pitch
    pub pitch_span: f32,
}

/// Wandering animal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    /// Shortest idle pause in whole seconds (inclusive)
    pub idle_min_secs: u32,

    /// Longest idle pause in whole seconds (exclusive)
    pub idle_max_secs: u32,

    /// Half extent of the square around home where targets are picked
    pub radius: f32,

    /// Walking speed in units per second
    pub walk_speed: f32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            yaw_max: 30.0,
            pitch_max: 20.0,
            roll_max: 15.0,
            parallax_x: 0.30,
            dolly_z_max: 2.5,
            mirror_forward_x: false,
        }
    }
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            use_depth_from_matrix: true,
            depth_range_z: 0.08,
            invert_depth: false,
            depth_ema_alpha: 0.15,
            depth_deadzone: 0.02,
        }
    }
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            rot_lerp: 10.0,
            pos_lerp: 10.0,
            half_size: 2.5,
            rotation_sign: RotationSign::Negated,
            blend: BlendMode::Linear,
        }
    }
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            left_eye: LEFT_EYE_LANDMARK,
            right_eye: RIGHT_EYE_LANDMARK,
            nose: NOSE_TIP_LANDMARK,
            yaw_span: 0.2,
            pitch_span: 0.15,
        }
    }
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            idle_min_secs: 5,
            idle_max_secs: 10,
            radius: 10.0,
            walk_speed: 2.0,
        }
    }
}

fn check_range(name: &str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "{name} must be between {min} and {max}, got {value}"
        )))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!("{name} must be non-negative, got {value}")))
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!("{name} must be greater than 0, got {value}")))
    }
}

fn check_finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!("{name} must be finite, got {value}")))
    }
}

impl PoseConfig {
    /// Rotation limits in the form the orientation code expects
    #[must_use]
    pub const fn limits(&self) -> AngleLimits {
        AngleLimits {
            yaw_max: self.yaw_max,
            pitch_max: self.pitch_max,
            roll_max: self.roll_max,
        }
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        check_range("yaw_max", self.yaw_max, YAW_LIMIT_RANGE)?;
        check_range("pitch_max", self.pitch_max, PITCH_LIMIT_RANGE)?;
        check_range("roll_max", self.roll_max, ROLL_LIMIT_RANGE)?;
        check_finite("parallax_x", self.parallax_x)?;
        check_finite("dolly_z_max", self.dolly_z_max)
    }
}

impl DepthConfig {
    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        check_positive("depth_range_z", self.depth_range_z)?;
        check_range("depth_ema_alpha", self.depth_ema_alpha, DEPTH_EMA_ALPHA_RANGE)?;
        check_range("depth_deadzone", self.depth_deadzone, DEPTH_DEADZONE_RANGE)
    }
}

impl RigConfig {
    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        check_non_negative("rot_lerp", self.rot_lerp)?;
        check_non_negative("pos_lerp", self.pos_lerp)?;
        check_non_negative("half_size", self.half_size)
    }
}

impl LandmarkConfig {
    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        check_positive("yaw_span", self.yaw_span)?;
        check_positive("pitch_span", self.pitch_span)
    }

    /// Number of landmarks a face must report for the fallback to apply
    #[must_use]
    pub fn required_landmarks(&self) -> usize {
        self.left_eye.max(self.right_eye).max(self.nose) + 1
    }
}

impl WanderConfig {
    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        if self.idle_min_secs >= self.idle_max_secs {
            return Err(Error::ConfigError(format!(
                "idle_min_secs ({}) must be less than idle_max_secs ({})",
                self.idle_min_secs, self.idle_max_secs
            )));
        }
        check_non_negative("radius", self.radius)?;
        check_positive("walk_speed", self.walk_speed)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.pose.validate()?;
        self.depth.validate()?;
        self.rig.validate()?;
        self.landmarks.validate()?;
        self.wander.validate()
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head Pose Rig Configuration

# Rotation clamp (degrees) and positional offsets
pose:
  yaw_max: 30.0
  pitch_max: 20.0
  roll_max: 15.0
  parallax_x: 0.3
  dolly_z_max: 2.5
  mirror_forward_x: false

# Depth from the pose matrix translation
depth:
  use_depth_from_matrix: true
  depth_range_z: 0.08
  invert_depth: false
  depth_ema_alpha: 0.15
  depth_deadzone: 0.02

# Per-frame interpolation of the controlled transform
rig:
  rot_lerp: 10.0
  pos_lerp: 10.0
  half_size: 2.5
  rotation_sign: negated
  blend: linear

# Landmark fallback (MediaPipe face mesh indices)
landmarks:
  enabled: true
  left_eye: 33
  right_eye: 263
  nose: 1
  yaw_span: 0.2
  pitch_span: 0.15

# Wandering animals
wander:
  idle_min_secs: 5
  idle_max_secs: 10
  radius: 10.0
  walk_speed: 2.0
"#;
