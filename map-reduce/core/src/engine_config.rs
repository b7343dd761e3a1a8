// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Deserialize;

/// How commands reach the workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueTopology {
    /// Every worker owns a private inbox and always folds its own chunk
    #[default]
    PerWorker,
    /// One inbox for the whole pool; idle workers pull the next chunk to fold
    Shared,
}

/// Whether worker threads are pinned to CPU cores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorePinning {
    #[default]
    Disabled,
    /// Worker `i` runs on core `i % cores`
    RoundRobin,
}

/// Pool configuration, fixed for the lifetime of an engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub workers: usize,
    pub topology: QueueTopology,
    pub pinning: CorePinning,
}

impl EngineConfig {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    pub fn with_topology(mut self, topology: QueueTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_pinning(mut self, pinning: CorePinning) -> Self {
        self.pinning = pinning;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            topology: QueueTopology::PerWorker,
            pinning: CorePinning::Disabled,
        }
    }
}
