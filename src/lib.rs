//! Head pose driven camera rig.
//!
//! This library turns face pose matrices reported by an external
//! face-landmark detector into smoothed, clamped camera motion:
//! - yaw/pitch/roll extracted from the pose matrix and clamped per axis
//! - a lateral parallax offset that follows yaw
//! - a forward/back dolly offset that follows head distance (or pitch)
//!
//! The detector callback and the render loop run on different schedules.
//! They share the latest targets through [`shared::PoseTargets`], a set of
//! atomic scalar cells, so neither side ever blocks the other.
//!
//! # Examples
//!
//! ## Detector side and render side
//!
//! ```
//! use head_pose_rig::{
//!     config::Config,
//!     face_detection::DetectionResult,
//!     pose_filter::PoseFilter,
//!     rig::{CameraRig, Transform},
//!     shared::PoseTargets,
//! };
//! use nalgebra::Matrix4;
//! use std::sync::Arc;
//!
//! # fn main() -> head_pose_rig::Result<()> {
//! let config = Config::default();
//! let targets = PoseTargets::new();
//!
//! let mut filter = PoseFilter::new(&config, Arc::clone(&targets))?;
//! let rig = CameraRig::new(Transform::default(), targets, config.rig.clone())?;
//!
//! // Detector callback
//! filter.on_detection(&DetectionResult::from_matrix(Matrix4::identity()));
//!
//! // Render loop
//! let mut camera = Transform::default();
//! rig.tick(&mut camera, 1.0 / 60.0);
//!
//! // UI action: re-anchor the neutral head distance on the next sample
//! filter.recalibrate();
//! # Ok(())
//! # }
//! ```
//!
//! ## Wandering animals
//!
//! ```
//! use head_pose_rig::{config::WanderConfig, rig::Transform, wander::WanderBehavior};
//! use nalgebra::Vector3;
//!
//! # fn main() -> head_pose_rig::Result<()> {
//! let home = Vector3::zeros();
//! let mut animal = WanderBehavior::with_seed(home, WanderConfig::default(), 42)?;
//! let mut transform = Transform::from_position(home);
//!
//! for _ in 0..600 {
//!     if let Some(event) = animal.tick(&mut transform, 1.0 / 30.0) {
//!         println!("play {}", event.clip());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Face detector result types
pub mod face_detection;

/// Landmark-based fallback angle estimation
pub mod mark_detection;

/// Orientation extraction from pose matrices
pub mod pose_estimation;

/// Scalar filters for smoothing the depth signal
pub mod filters;

/// Depth baseline and smoothing
pub mod depth;

/// Detector-side pose filter
pub mod pose_filter;

/// Atomic targets shared with the render loop
pub mod shared;

/// Render-side camera rig
pub mod rig;

/// Wandering animal behavior
pub mod wander;

/// Offline trace replay
pub mod replay;

/// Numeric helpers
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
