// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Objective, Particle, Random, Sample, DIMENSIONS};

/// Coefficients of the velocity update and the bounds of the search space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwarmParams {
    pub inertia: f32,
    /// Pull towards the particle's own best
    pub cognitive: f32,
    /// Pull towards the swarm's best
    pub social: f32,
    pub lower: f32,
    pub upper: f32,
}

impl SwarmParams {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self {
            inertia: 1.0,
            cognitive: 1.0,
            social: 1.0,
            lower,
            upper,
        }
    }
}

/// Fold a coordinate back into `[lower, upper]`, treating the space as a torus
pub fn wrap(value: f32, lower: f32, upper: f32) -> f32 {
    let span = upper - lower;
    if span <= 0.0 {
        return lower;
    }

    if value < lower {
        lower + (value - lower).rem_euclid(span)
    } else if value > upper {
        upper - (upper - value).rem_euclid(span)
    } else {
        value
    }
}

/// Move one particle towards its own best and the swarm's best
///
/// Returns the particle's best sample after the move.
pub fn update_particle(
    particle: &mut Particle,
    global_best: &Sample,
    params: &SwarmParams,
    objective: &dyn Objective,
    rng: &mut dyn Random,
) -> Sample {
    let (lower, upper) = (params.lower, params.upper);

    for d in 0..DIMENSIONS {
        let own = rng.uniform(lower, upper)
            * params.cognitive
            * (particle.best.position[d] - particle.current.position[d]);
        let swarm = rng.uniform(lower, upper)
            * params.social
            * (global_best.position[d] - particle.current.position[d]);
        particle.velocity[d] = params.inertia * particle.velocity[d] + own + swarm;
    }

    for d in 0..DIMENSIONS {
        particle.current.position[d] =
            wrap(particle.current.position[d] + particle.velocity[d], lower, upper);
    }

    particle.current.value = objective.evaluate(&particle.current.position);
    particle.best = Sample::better(particle.current, particle.best);
    particle.best
}
