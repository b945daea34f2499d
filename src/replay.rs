//! Offline replay of recorded pose traces.
//!
//! A trace is a YAML list of per-frame detector outputs; `~` marks a frame
//! with no face. The replay feeds each frame to the [`PoseFilter`], ticks
//! the [`CameraRig`] at a fixed frame rate and optionally drives a few
//! wandering animals alongside.

use crate::{
    config::Config,
    pose_estimation::PoseSample,
    pose_filter::PoseFilter,
    rig::{CameraRig, Transform},
    shared::{PoseTargets, TargetSnapshot},
    wander::{WanderBehavior, WanderEvent},
    Error, Result,
};
use log::{debug, info};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// One recorded face pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub forward: [f32; 3],
    pub up: [f32; 3],
    pub translation_z: f32,
}

impl From<TraceFrame> for PoseSample {
    fn from(frame: TraceFrame) -> Self {
        Self::new(Vector3::from(frame.forward), Vector3::from(frame.up), frame.translation_z)
    }
}

/// Recorded sequence of detector outputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseTrace {
    /// `None` for frames where no face was detected
    pub frames: Vec<Option<TraceFrame>>,
}

impl PoseTrace {
    /// Parse a trace from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::TraceError(format!("Failed to parse trace: {e}")))
    }

    /// Load a trace from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Replay options that are not part of the scene configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOptions {
    /// Render frames per second
    pub fps: f32,
    /// Frame indices before which a recalibration is requested
    pub recalibrate_at: Vec<usize>,
    /// Number of wandering animals to simulate
    pub animals: usize,
    /// Seed for the animals' random source
    pub seed: u64,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            fps: crate::constants::DEFAULT_FPS,
            recalibrate_at: Vec::new(),
            animals: 0,
            seed: 0,
        }
    }
}

/// State of the scene after one replayed frame
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    pub index: usize,
    /// Whether this frame carried a face
    pub detected: bool,
    pub targets: TargetSnapshot,
    pub camera: Transform,
    pub animals: Vec<Transform>,
}

struct Animal {
    behavior: WanderBehavior,
    transform: Transform,
}

/// Trace replay driver
pub struct ReplayApp {
    options: ReplayOptions,
    filter: PoseFilter,
    rig: CameraRig,
    camera: Transform,
    animals: Vec<Animal>,
}

impl ReplayApp {
    /// Build the filter, rig and animals for a replay
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or fps is not positive
    pub fn new(config: &Config, camera: Transform, options: ReplayOptions) -> Result<Self> {
        if !(options.fps > 0.0 && options.fps.is_finite()) {
            return Err(Error::InvalidInput(format!("fps must be positive, got {}", options.fps)));
        }
        config.validate()?;

        let targets = PoseTargets::new();
        let filter = PoseFilter::new(config, Arc::clone(&targets))?;
        let rig = CameraRig::new(camera, targets, config.rig.clone())?;

        let animals = (0..options.animals)
            .map(|i| {
                let home = Vector3::new(i as f32 * 2.0 * config.wander.radius, 0.0, 0.0);
                let seed = options.seed.wrapping_add(i as u64);
                let behavior = WanderBehavior::with_seed(home, config.wander.clone(), seed)?;
                Ok(Animal {
                    behavior,
                    transform: Transform::from_position(home),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Replay ready: {} fps, {} animals, recalibrating at {:?}",
            options.fps, options.animals, options.recalibrate_at
        );

        Ok(Self {
            options,
            filter,
            rig,
            camera,
            animals,
        })
    }

    /// Replay every frame of `trace`, reporting the scene after each one
    pub fn run(&mut self, trace: &PoseTrace, mut on_frame: impl FnMut(&ReplayFrame)) -> Vec<ReplayFrame> {
        let dt = 1.0 / self.options.fps;
        let mut frames = Vec::with_capacity(trace.len());

        for (index, frame) in trace.frames.iter().enumerate() {
            if self.options.recalibrate_at.contains(&index) {
                info!("Recalibrating depth baseline at frame {index}");
                self.filter.recalibrate();
            }

            let detected = match frame {
                Some(frame) => self.filter.on_pose_sample(PoseSample::from(*frame)).is_some(),
                None => {
                    debug!("Frame {index}: no face");
                    false
                }
            };

            self.rig.tick(&mut self.camera, dt);

            for (i, animal) in self.animals.iter_mut().enumerate() {
                if let Some(event) = animal.behavior.tick(&mut animal.transform, dt) {
                    match event {
                        WanderEvent::Idle { duration_secs } => {
                            info!("Animal {i}: playing '{}' for {duration_secs}s", event.clip());
                        }
                        WanderEvent::Walk { target } => {
                            info!(
                                "Animal {i}: playing '{}' toward ({:.2}, {:.2})",
                                event.clip(),
                                target.x,
                                target.z
                            );
                        }
                    }
                }
            }

            let replayed = ReplayFrame {
                index,
                detected,
                targets: self.filter.targets().snapshot(),
                camera: self.camera,
                animals: self.animals.iter().map(|a| a.transform).collect(),
            };
            on_frame(&replayed);
            frames.push(replayed);
        }

        frames
    }
}
