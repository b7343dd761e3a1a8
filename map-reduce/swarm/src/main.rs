// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::Parser;
use map_reduce_core::{CorePinning, QueueTopology};
use map_reduce_swarm::{
    AtomicShutdownSignal, BackendKind, ObjectiveKind, Optimizer, ScopedTimer, Swarm, SwarmConfig,
};
use std::path::PathBuf;

/// Particle-swarm minimization driven by a persistent map-reduce worker pool
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON configuration file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed of the random number generators
    #[arg(long)]
    seed: Option<u64>,

    /// Number of particles
    #[arg(short = 'n', long)]
    particles: Option<usize>,

    /// Number of rounds
    #[arg(short = 'i', long)]
    iterations: Option<usize>,

    /// Worker threads, 0 runs sequentially
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    #[arg(long, value_enum)]
    objective: Option<ObjectiveKind>,

    /// Microseconds spent in each evaluation of the delayed sum
    #[arg(long)]
    delay_us: Option<u64>,

    /// Riemann sum step of the sine integral (0.1, 0.01, ...)
    #[arg(long)]
    precision: Option<f32>,

    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Let workers pull chunks from one shared inbox
    #[arg(long)]
    shared_inbox: bool,

    /// Pin worker threads to CPU cores
    #[arg(long)]
    pin_cores: bool,
}

impl Args {
    fn into_config(self) -> SwarmConfig {
        let mut config = match &self.config {
            Some(path) => match SwarmConfig::load(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Failed to load {}: {}", path.display(), e);
                    eprintln!("Using default configuration...");
                    SwarmConfig::default()
                }
            },
            None => SwarmConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(particles) = self.particles {
            config.particles = particles;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(workers) = self.workers {
            config.engine.workers = workers;
        }
        if let Some(objective) = self.objective {
            config.objective = objective;
        }
        if let Some(delay_us) = self.delay_us {
            config.delay_us = delay_us;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if self.shared_inbox {
            config.engine.topology = QueueTopology::Shared;
        }
        if self.pin_cores {
            config.engine.pinning = CorePinning::RoundRobin;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config();
    config.validate()?;

    println!("=== PARTICLE SWARM ===");
    println!("Configuration:");
    println!("  - Seed: {}", config.seed);
    println!("  - Particles: {}", config.particles);
    println!("  - Iterations: {}", config.iterations);
    println!("  - Objective: {:?}", config.objective);
    println!("  - Workers: {}", config.engine.workers);

    let mut swarm = Swarm::initialize(
        config.seed,
        config.particles,
        config.params(),
        config.build_objective()?,
    )?;
    println!("Initial best: {}", swarm.global_best());

    let shutdown = AtomicShutdownSignal::new();
    let ctrl_c = shutdown.clone();
    ctrlc::set_handler(move || {
        println!("\n=== Ctrl+C received, initiating shutdown ===");
        ctrl_c.shutdown();
    })?;

    let optimizer = Optimizer::new(config.backend(), config.seed);
    let rounds = {
        let _timer = ScopedTimer::new(format!("{:?}", optimizer.backend()));
        optimizer.run(&mut swarm, config.iterations, &shutdown)?
    };

    println!("Completed {} rounds", rounds);
    println!("GLB> {}", swarm.global_best());
    Ok(())
}
