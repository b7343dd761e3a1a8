// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Objective, Particle, Random, Sample, SeededRandom, SwarmError, SwarmParams, DIMENSIONS};
use std::sync::Arc;

/// Particles of one optimization run together with the best sample seen so far
pub struct Swarm {
    pub(crate) particles: Vec<Particle>,
    pub(crate) global_best: Sample,
    params: SwarmParams,
    objective: Arc<dyn Objective>,
}

impl Swarm {
    /// Scatter `size` particles uniformly over the search space
    ///
    /// All draws come from a single generator seeded with `seed`, so the
    /// starting swarm only depends on the seed.
    pub fn initialize(
        seed: u64,
        size: usize,
        params: SwarmParams,
        objective: Arc<dyn Objective>,
    ) -> Result<Self, SwarmError> {
        if size == 0 {
            return Err(SwarmError::EmptySwarm);
        }
        if params.lower.is_nan() || params.upper.is_nan() || params.lower >= params.upper {
            return Err(SwarmError::InvalidConfig(format!(
                "invalid search space [{}, {}]",
                params.lower, params.upper
            )));
        }

        let mut rng = SeededRandom::new(seed);
        let particles: Vec<Particle> = (0..size)
            .map(|_| scatter(&mut rng, &params, objective.as_ref()))
            .collect();

        let global_best = particles
            .iter()
            .fold(particles[0].best, |best, p| Sample::better(best, p.best));

        Ok(Self {
            particles,
            global_best,
            params,
            objective,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn global_best(&self) -> Sample {
        self.global_best
    }

    pub fn params(&self) -> &SwarmParams {
        &self.params
    }

    pub fn objective(&self) -> &Arc<dyn Objective> {
        &self.objective
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn scatter(rng: &mut dyn Random, params: &SwarmParams, objective: &dyn Objective) -> Particle {
    let mut velocity = [0.0; DIMENSIONS];
    let mut position = [0.0; DIMENSIONS];
    for d in 0..DIMENSIONS {
        velocity[d] = rng.uniform(params.lower, params.upper) / 4.0;
        position[d] = rng.uniform(params.lower, params.upper);
    }

    let current = Sample {
        position,
        value: objective.evaluate(&position),
    };

    Particle {
        current,
        best: current,
        velocity,
    }
}
