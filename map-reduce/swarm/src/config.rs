// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Backend, DelayedSum, Objective, ObjectiveKind, SineIntegral, SwarmError, SwarmParams};
use clap::ValueEnum;
use map_reduce_core::EngineConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Sequential,
    #[default]
    MapReduce,
    Rayon,
}

/// Settings of one optimization run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub seed: u64,
    pub particles: usize,
    pub iterations: usize,
    pub objective: ObjectiveKind,
    /// Artificial cost of one `DelayedSum` evaluation, in microseconds
    pub delay_us: u64,
    /// Step of the `SineIntegral` Riemann sum
    pub precision: f32,
    pub inertia: f32,
    pub cognitive: f32,
    pub social: f32,
    pub backend: BackendKind,
    pub engine: EngineConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            particles: 1_000,
            iterations: 100,
            objective: ObjectiveKind::DelayedSum,
            delay_us: 0,
            precision: 0.01,
            inertia: 1.0,
            cognitive: 1.0,
            social: 1.0,
            backend: BackendKind::MapReduce,
            engine: EngineConfig::new(4),
        }
    }
}

impl SwarmConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SwarmError> {
        let contents = fs::read_to_string(path)?;
        let config: SwarmConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SwarmError> {
        if self.particles == 0 {
            return Err(SwarmError::EmptySwarm);
        }
        if self.iterations == 0 {
            return Err(SwarmError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn build_objective(&self) -> Result<Arc<dyn Objective>, SwarmError> {
        Ok(match self.objective {
            ObjectiveKind::DelayedSum => {
                Arc::new(DelayedSum::new(Duration::from_micros(self.delay_us)))
            }
            ObjectiveKind::SineIntegral => Arc::new(SineIntegral::new(self.precision)?),
        })
    }

    pub fn params(&self) -> SwarmParams {
        let (lower, upper) = self.objective.bounds();
        SwarmParams {
            inertia: self.inertia,
            cognitive: self.cognitive,
            social: self.social,
            lower,
            upper,
        }
    }

    /// Zero workers selects the sequential loop, whatever the backend kind
    pub fn backend(&self) -> Backend {
        if self.engine.workers == 0 {
            return Backend::Sequential;
        }
        match self.backend {
            BackendKind::Sequential => Backend::Sequential,
            BackendKind::MapReduce => Backend::MapReduce(self.engine.clone()),
            BackendKind::Rayon => Backend::Rayon {
                workers: self.engine.workers,
            },
        }
    }
}
