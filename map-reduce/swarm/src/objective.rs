// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SwarmError, DIMENSIONS};
use clap::ValueEnum;
use serde::Deserialize;
use std::thread;
use std::time::Duration;

/// Function minimized by the swarm
pub trait Objective: Send + Sync {
    fn evaluate(&self, position: &[f32; DIMENSIONS]) -> f32;
}

/// `x + y`, optionally slowed down to emulate an expensive evaluation
pub struct DelayedSum {
    delay: Duration,
}

impl DelayedSum {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Objective for DelayedSum {
    fn evaluate(&self, position: &[f32; DIMENSIONS]) -> f32 {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        position[0] + position[1]
    }
}

/// Signed left Riemann sum of `sin` between the two coordinates
///
/// Integrates from the smaller to the larger coordinate with step
/// `precision` and flips the sign when `x > y`.
pub struct SineIntegral {
    precision: f32,
}

impl SineIntegral {
    pub fn new(precision: f32) -> Result<Self, SwarmError> {
        if precision.is_nan() || precision <= 0.0 {
            return Err(SwarmError::InvalidConfig(format!(
                "integration precision must be positive, got {}",
                precision
            )));
        }
        Ok(Self { precision })
    }
}

impl Objective for SineIntegral {
    fn evaluate(&self, position: &[f32; DIMENSIONS]) -> f32 {
        let [x, y] = *position;
        let (mut a, b) = if x < y { (x, y) } else { (y, x) };

        let mut integral = 0.0;
        while a < b {
            integral += self.precision * a.sin();
            a += self.precision;
        }

        if x < y {
            integral
        } else {
            -integral
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    #[default]
    DelayedSum,
    SineIntegral,
}

impl ObjectiveKind {
    /// Search space bounds the objective is meant to be explored on
    pub fn bounds(self) -> (f32, f32) {
        match self {
            ObjectiveKind::DelayedSum => (0.0, 1.0),
            ObjectiveKind::SineIntegral => (0.0, 4.0),
        }
    }
}
