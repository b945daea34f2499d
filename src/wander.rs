//! Wandering animal behavior.
//!
//! An animal idles for a random whole number of seconds, picks a random
//! point in a square around its home, turns to face it and walks there with
//! an ease-out motion at a fixed average speed. Then it idles again. The
//! host plays the animation clip named by each returned [`WanderEvent`].

use crate::{
    config::WanderConfig,
    constants::{IDLE_CLIP, MIN_AXIS_SQR_MAGNITUDE, WALK_CLIP},
    pose_estimation::safe_look_rotation,
    rig::Transform,
    Result,
};
use log::debug;
use nalgebra::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// What the animal is doing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WanderPhase {
    /// Standing still
    Idle {
        /// Seconds left before walking
        remaining: f32,
    },
    /// Moving toward a target
    Walking {
        from: Vector3<f32>,
        to: Vector3<f32>,
        elapsed: f32,
        duration: f32,
    },
}

/// Phase change reported to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WanderEvent {
    /// Started idling for this many seconds
    Idle { duration_secs: u32 },
    /// Started walking toward `target`
    Walk { target: Vector3<f32> },
}

impl WanderEvent {
    /// Animation clip the host should play
    #[must_use]
    pub const fn clip(&self) -> &'static str {
        match self {
            Self::Idle { .. } => IDLE_CLIP,
            Self::Walk { .. } => WALK_CLIP,
        }
    }
}

/// Idle/walk state machine for one animal
pub struct WanderBehavior<R: Rng = StdRng> {
    home: Vector3<f32>,
    config: WanderConfig,
    phase: WanderPhase,
    rng: R,
}

impl WanderBehavior<StdRng> {
    /// Behavior with a deterministic random source
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range
    pub fn with_seed(home: Vector3<f32>, config: WanderConfig, seed: u64) -> Result<Self> {
        Self::new(home, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WanderBehavior<R> {
    /// Create a behavior that starts idling at `home`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range
    pub fn new(home: Vector3<f32>, config: WanderConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let idle = rng.gen_range(config.idle_min_secs..config.idle_max_secs);
        Ok(Self {
            home,
            phase: WanderPhase::Idle {
                remaining: idle as f32,
            },
            config,
            rng,
        })
    }

    #[must_use]
    pub const fn home(&self) -> Vector3<f32> {
        self.home
    }

    #[must_use]
    pub const fn phase(&self) -> &WanderPhase {
        &self.phase
    }

    /// Clip matching the current phase
    #[must_use]
    pub const fn current_clip(&self) -> &'static str {
        match self.phase {
            WanderPhase::Idle { .. } => IDLE_CLIP,
            WanderPhase::Walking { .. } => WALK_CLIP,
        }
    }

    /// Advance by `dt` seconds, moving `transform` while walking.
    ///
    /// Returns an event when the phase changes.
    pub fn tick(&mut self, transform: &mut Transform, dt: f32) -> Option<WanderEvent> {
        let dt = dt.max(0.0);
        match &mut self.phase {
            WanderPhase::Idle { remaining } => {
                *remaining -= dt;
                if *remaining > 0.0 {
                    return None;
                }
                Some(self.start_walk(transform))
            }
            WanderPhase::Walking {
                from,
                to,
                elapsed,
                duration,
            } => {
                *elapsed += dt;
                let progress = if *duration > 0.0 {
                    (*elapsed / *duration).min(1.0)
                } else {
                    1.0
                };
                transform.position = *from + (*to - *from) * ease_out_quad(progress);
                if progress < 1.0 {
                    return None;
                }
                Some(self.start_idle())
            }
        }
    }

    fn start_walk(&mut self, transform: &mut Transform) -> WanderEvent {
        let radius = self.config.radius;
        let mut offset = || {
            if radius > 0.0 {
                self.rng.gen_range(-radius..radius)
            } else {
                0.0
            }
        };
        let target = self.home + Vector3::new(offset(), 0.0, offset());

        let heading = target - transform.position;
        if heading.norm_squared() >= MIN_AXIS_SQR_MAGNITUDE {
            transform.rotation = safe_look_rotation(heading, Vector3::y());
        }

        let duration = heading.norm() / self.config.walk_speed;
        debug!(
            "Walking to ({:.2}, {:.2}, {:.2}) over {duration:.2}s",
            target.x, target.y, target.z
        );
        self.phase = WanderPhase::Walking {
            from: transform.position,
            to: target,
            elapsed: 0.0,
            duration,
        };
        WanderEvent::Walk { target }
    }

    fn start_idle(&mut self) -> WanderEvent {
        let duration_secs = self
            .rng
            .gen_range(self.config.idle_min_secs..self.config.idle_max_secs);
        self.phase = WanderPhase::Idle {
            remaining: duration_secs as f32,
        };
        WanderEvent::Idle { duration_secs }
    }
}

/// Decelerating ease: fast start, gentle arrival
#[must_use]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}
