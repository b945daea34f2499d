//! Render-side camera rig.
//!
//! The host calls [`CameraRig::tick`] once per rendered frame with the
//! elapsed time. The rig reads the latest targets, builds the target pose
//! relative to the base pose captured at start-up and moves the controlled
//! transform part of the way there. It keeps no timer of its own.

use crate::{
    config::RigConfig,
    constants::SLERP_EPSILON,
    shared::{PoseTargets, TargetSnapshot},
    utils::{clamp_symmetric, lerp_vector},
    Result,
};
use log::info;
use nalgebra::{UnitQuaternion, Vector3};
use std::sync::Arc;

/// Position and rotation of a host-owned object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Transform {
    #[must_use]
    pub const fn new(position: Vector3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self { position, rotation }
    }

    /// Unrotated transform at `position`
    #[must_use]
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self::new(position, UnitQuaternion::identity())
    }

    /// Direction the transform faces (+Z rotated)
    #[must_use]
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * Vector3::z()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vector3::zeros())
    }
}

/// Interpolates a controlled transform toward the shared pose targets
pub struct CameraRig {
    base: Transform,
    config: RigConfig,
    targets: Arc<PoseTargets>,
}

impl CameraRig {
    /// Create a rig around the transform's pose at start-up
    ///
    /// # Errors
    ///
    /// Returns an error if the rig configuration is out of range
    pub fn new(base: Transform, targets: Arc<PoseTargets>, config: RigConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Initializing CameraRig at ({:.2}, {:.2}, {:.2}), half_size={} sign={:?} blend={:?}",
            base.position.x, base.position.y, base.position.z, config.half_size, config.rotation_sign, config.blend
        );
        Ok(Self {
            base,
            config,
            targets,
        })
    }

    #[must_use]
    pub const fn base(&self) -> &Transform {
        &self.base
    }

    #[must_use]
    pub const fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Target pose for the given targets
    #[must_use]
    pub fn target_for(&self, snapshot: &TargetSnapshot) -> Transform {
        let angles = snapshot.angles.scaled(self.config.rotation_sign.factor());
        let rotation = self.base.rotation * angles.to_rotation();

        let mut position = self.base.position + Vector3::new(snapshot.parallax_x, 0.0, snapshot.dolly_z);
        self.clamp_to_bounds(&mut position);

        Transform::new(position, rotation)
    }

    /// Target pose for the latest published targets
    #[must_use]
    pub fn target(&self) -> Transform {
        self.target_for(&self.targets.snapshot())
    }

    /// Advance `transform` toward the current target by `dt` seconds
    pub fn tick(&self, transform: &mut Transform, dt: f32) {
        let target = self.target();

        let rot_t = self.config.blend.factor(self.config.rot_lerp, dt);
        transform.rotation = slerp_toward(&transform.rotation, &target.rotation, rot_t);

        let pos_t = self.config.blend.factor(self.config.pos_lerp, dt);
        transform.position = lerp_vector(&transform.position, &target.position, pos_t);
        // Only moves anything when the transform started outside the boundary.
        self.clamp_to_bounds(&mut transform.position);
    }

    fn clamp_to_bounds(&self, position: &mut Vector3<f32>) {
        position.x = clamp_symmetric(position.x, self.config.half_size);
        position.z = clamp_symmetric(position.z, self.config.half_size);
    }
}

/// Shortest-path slerp, with nlerp for rotations too close to slerp stably
#[must_use]
pub fn slerp_toward(current: &UnitQuaternion<f32>, target: &UnitQuaternion<f32>, t: f32) -> UnitQuaternion<f32> {
    current.try_slerp(target, t, SLERP_EPSILON).unwrap_or_else(|| {
        let target = if current.coords.dot(&target.coords) < 0.0 {
            UnitQuaternion::new_unchecked(-target.into_inner())
        } else {
            *target
        };
        current.nlerp(&target, t)
    })
}
