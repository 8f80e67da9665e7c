// Copyright (c) 2025 - Cowboy AI, Inc.
//! Random Draws for Probabilistic Decisions
//!
//! The decider never reaches for an ambient generator. The runtime passes a
//! [`RandomSource`] into every decision, which lets tests substitute
//! [`FixedDraw`] and lets a process seed [`ProcessRng`] for reproducible runs.
//!
//! A draw is used by exactly one decision. Its outcome is stored in the
//! emitted event, so replay never draws again.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

use crate::config::ConfigError;

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource: Send + Sync {
    /// Draw one value
    fn draw(&self) -> f64;
}

/// Process-wide pseudo-random generator
#[derive(Debug)]
pub struct ProcessRng {
    rng: Mutex<StdRng>,
}

impl ProcessRng {
    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Generator with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for ProcessRng {
    fn draw(&self) -> f64 {
        // A panic while holding the lock cannot leave the generator inconsistent
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random::<f64>()
    }
}

/// Always draws the same value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDraw(pub f64);

impl RandomSource for FixedDraw {
    fn draw(&self) -> f64 {
        self.0
    }
}

/// Weighted outcome rule for a pokeball throw
///
/// A throw succeeds iff the draw is strictly greater than `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchPolicy {
    threshold: f64,
}

impl CatchPolicy {
    /// Threshold used when none is configured
    pub const DEFAULT_THRESHOLD: f64 = 0.5;

    /// Create a policy; the threshold must lie within `[0, 1]`
    pub fn new(threshold: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::CatchThresholdOutOfRange(threshold));
        }
        Ok(Self { threshold })
    }

    /// Configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Draw once and decide the outcome
    pub fn roll(&self, random: &dyn RandomSource) -> bool {
        random.draw() > self.threshold
    }
}

impl Default for CatchPolicy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}
