// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod particle;
pub use particle::{Particle, Sample, DIMENSIONS};

pub mod objective;
pub use objective::{DelayedSum, Objective, ObjectiveKind, SineIntegral};

pub mod random;
pub use random::{Random, SeededRandom};

mod update;
pub use update::{update_particle, wrap, SwarmParams};

mod swarm;
pub use swarm::Swarm;

mod optimizer;
pub use optimizer::{Backend, Optimizer, ParticleMapper};

mod config;
pub use config::{BackendKind, SwarmConfig};

mod swarm_error;
pub use swarm_error::SwarmError;

pub mod shutdown_signal;
pub use shutdown_signal::{AtomicShutdownSignal, ShutdownSignal};

mod timer;
pub use timer::ScopedTimer;
