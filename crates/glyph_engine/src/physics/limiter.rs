//! Update limiting for periodic systems
//!
//! A limiter is asked once per frame whether its system should run. A
//! skipped frame does no work at all.

use super::error::CollisionError;
use crate::config::LimiterConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decides, frame by frame, whether a system runs
pub trait UpdateLimit: fmt::Debug {
    /// Called once per frame; returns `true` when the system should run
    fn on_update(&mut self, delta_time: f32) -> bool;
}

/// Runs once every `frames_per_update` calls
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frames_per_update: u32,
    count: u32,
}

impl FrameLimiter {
    /// `frames_per_update` must be at least 1
    pub fn new(frames_per_update: u32) -> Result<Self, CollisionError> {
        if frames_per_update == 0 {
            return Err(CollisionError::InvalidLimiter(
                "frames_per_update must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            frames_per_update,
            count: 0,
        })
    }

    /// Frames between runs
    pub fn frames_per_update(&self) -> u32 {
        self.frames_per_update
    }
}

impl UpdateLimit for FrameLimiter {
    fn on_update(&mut self, _delta_time: f32) -> bool {
        self.count += 1;
        if self.count >= self.frames_per_update {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

/// How a [`RateLimiter`] interprets its rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateMode {
    /// Runs per second
    #[default]
    FramesPerSecond,
    /// Seconds between runs
    SecondsPerFrame,
}

/// Runs at a fixed rate measured in elapsed time
#[derive(Debug, Clone)]
pub struct RateLimiter {
    rate: f32,
    mode: RateMode,
    time_remaining: f32,
}

impl RateLimiter {
    /// `rate` must be finite and positive
    ///
    /// With `update_on_first_frame` the very first call runs; otherwise the
    /// first run waits one full period.
    pub fn new(rate: f32, mode: RateMode, update_on_first_frame: bool) -> Result<Self, CollisionError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CollisionError::InvalidLimiter(format!(
                "rate must be finite and > 0, got {rate}"
            )));
        }
        let mut limiter = Self {
            rate,
            mode,
            time_remaining: 0.0,
        };
        if !update_on_first_frame {
            limiter.time_remaining = limiter.time_per_update();
        }
        Ok(limiter)
    }

    /// Configured rate
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Rate interpretation
    pub fn mode(&self) -> RateMode {
        self.mode
    }

    /// Seconds between runs
    pub fn time_per_update(&self) -> f32 {
        match self.mode {
            RateMode::FramesPerSecond => 1.0 / self.rate,
            RateMode::SecondsPerFrame => self.rate,
        }
    }
}

impl UpdateLimit for RateLimiter {
    fn on_update(&mut self, delta_time: f32) -> bool {
        self.time_remaining -= delta_time;
        let run = self.time_remaining <= 0.0;
        if run {
            self.time_remaining = self.time_per_update();
        }
        run
    }
}

/// Build a boxed limiter from its configuration
pub fn build_limiter(config: &LimiterConfig) -> Result<Box<dyn UpdateLimit>, CollisionError> {
    Ok(match *config {
        LimiterConfig::Frames { frames_per_update } => Box::new(FrameLimiter::new(frames_per_update)?),
        LimiterConfig::Rate {
            rate,
            mode,
            update_on_first_frame,
        } => Box::new(RateLimiter::new(rate, mode, update_on_first_frame)?),
    })
}
