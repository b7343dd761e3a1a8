// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    update_particle, Objective, Particle, Random, Sample, SeededRandom, ShutdownSignal, Swarm,
    SwarmError, SwarmParams,
};
use log::info;
use map_reduce_core::{
    partitioner, EngineConfig, EngineError, MapReduceEngine, Mapper, MapperFactory, SharedInput,
};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::Arc;

/// Where the rounds of an optimization run are executed
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    /// Single thread, one generator
    Sequential,
    /// Persistent worker pool
    MapReduce(EngineConfig),
    /// Rayon parallel fold over the same chunks as the worker pool
    Rayon { workers: usize },
}

/// Map step of the swarm: move a particle, return its best sample
///
/// Owns the generator of its chunk, so each chunk draws from its own
/// reproducible stream no matter which thread runs it.
pub struct ParticleMapper<G: Random> {
    params: SwarmParams,
    objective: Arc<dyn Objective>,
    rng: G,
}

impl<G: Random> ParticleMapper<G> {
    pub fn new(params: SwarmParams, objective: Arc<dyn Objective>, rng: G) -> Self {
        Self {
            params,
            objective,
            rng,
        }
    }
}

impl<G: Random> Mapper<Particle, Sample> for ParticleMapper<G> {
    fn map(&mut self, particle: &mut Particle, global_best: &Sample) -> Sample {
        update_particle(
            particle,
            global_best,
            &self.params,
            self.objective.as_ref(),
            &mut self.rng,
        )
    }
}

/// Drives a swarm for a number of rounds on a chosen backend
pub struct Optimizer {
    backend: Backend,
    seed: u64,
}

impl Optimizer {
    /// `seed` derives the per-chunk generators used while the swarm moves
    pub fn new(backend: Backend, seed: u64) -> Self {
        Self { backend, seed }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Run up to `iterations` rounds, stopping early once `shutdown` fires
    ///
    /// Returns the number of rounds completed. The swarm's particles and
    /// global best are updated in place.
    pub fn run<S: ShutdownSignal>(
        &self,
        swarm: &mut Swarm,
        iterations: usize,
        shutdown: &S,
    ) -> Result<usize, SwarmError> {
        info!(
            "Running up to {} rounds over {} particles on {:?}",
            iterations,
            swarm.len(),
            self.backend
        );

        let rounds = match &self.backend {
            Backend::Sequential => self.run_sequential(swarm, iterations, shutdown),
            Backend::MapReduce(config) => self.run_map_reduce(swarm, config, iterations, shutdown)?,
            Backend::Rayon { workers } => self.run_rayon(swarm, *workers, iterations, shutdown)?,
        };

        if rounds < iterations {
            info!("Interrupted after {} of {} rounds", rounds, iterations);
        }
        Ok(rounds)
    }

    fn mapper(&self, swarm: &Swarm, chunk: usize) -> ParticleMapper<SeededRandom> {
        ParticleMapper::new(
            *swarm.params(),
            Arc::clone(swarm.objective()),
            SeededRandom::for_chunk(self.seed, chunk),
        )
    }

    fn run_sequential<S: ShutdownSignal>(
        &self,
        swarm: &mut Swarm,
        iterations: usize,
        shutdown: &S,
    ) -> usize {
        let mut mapper = self.mapper(swarm, 0);

        let mut rounds = 0;
        while rounds < iterations && !shutdown.is_cancelled() {
            let reference = swarm.global_best;
            swarm.global_best = swarm.particles.iter_mut().fold(reference, |best, particle| {
                Sample::better(best, mapper.map(particle, &reference))
            });
            rounds += 1;
        }
        rounds
    }

    fn run_map_reduce<S: ShutdownSignal>(
        &self,
        swarm: &mut Swarm,
        config: &EngineConfig,
        iterations: usize,
        shutdown: &S,
    ) -> Result<usize, SwarmError> {
        let params = *swarm.params();
        let objective = Arc::clone(swarm.objective());
        let seed = self.seed;
        let factory = move |chunk: usize| {
            ParticleMapper::new(
                params,
                Arc::clone(&objective),
                SeededRandom::for_chunk(seed, chunk),
            )
        };

        // The handle outlives the engine so the particles come back on every path
        let input = SharedInput::new(std::mem::take(&mut swarm.particles));
        let outcome = drive_engine(
            input.clone(),
            factory,
            config,
            &mut swarm.global_best,
            iterations,
            shutdown,
        );

        swarm.particles = input
            .try_into_vec()
            .unwrap_or_else(|input| input.snapshot());
        outcome
    }

    fn run_rayon<S: ShutdownSignal>(
        &self,
        swarm: &mut Swarm,
        workers: usize,
        iterations: usize,
        shutdown: &S,
    ) -> Result<usize, SwarmError> {
        if workers == 0 {
            return Err(EngineError::NoWorkers.into());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("swarm-rayon-{}", i))
            .build()?;

        let chunks = partitioner::partition(swarm.len(), workers);
        let mut mappers: Vec<_> = (0..workers).map(|chunk| self.mapper(swarm, chunk)).collect();

        let mut rounds = 0;
        while rounds < iterations && !shutdown.is_cancelled() {
            let reference = swarm.global_best;
            let slices = split_chunks(&mut swarm.particles, &chunks);

            let partials: Vec<Sample> = pool.install(|| {
                slices
                    .into_par_iter()
                    .zip(mappers.par_iter_mut())
                    .map(|(slice, mapper)| {
                        slice.iter_mut().fold(reference, |best, particle| {
                            Sample::better(best, mapper.map(particle, &reference))
                        })
                    })
                    .collect()
            });

            swarm.global_best = partials.into_iter().fold(reference, Sample::better);
            rounds += 1;
        }
        Ok(rounds)
    }
}

/// Build an engine over `input`, run the rounds, then stop it
fn drive_engine<MF, S>(
    input: SharedInput<Particle>,
    factory: MF,
    config: &EngineConfig,
    global_best: &mut Sample,
    iterations: usize,
    shutdown: &S,
) -> Result<usize, SwarmError>
where
    MF: MapperFactory<Particle, Sample>,
    S: ShutdownSignal,
{
    let mut engine = MapReduceEngine::with_mappers(input, factory, Sample::better, config.clone())?;

    let mut rounds = 0;
    let mut failure = None;
    while rounds < iterations && !shutdown.is_cancelled() {
        match engine.compute(*global_best) {
            Ok(best) => *global_best = best,
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
        rounds += 1;
    }

    engine.stop()?;

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(rounds),
    }
}

/// Borrow `items` as one mutable slice per chunk
fn split_chunks<'a, T>(mut items: &'a mut [T], chunks: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut slices = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let (head, tail) = std::mem::take(&mut items).split_at_mut(chunk.len());
        slices.push(head);
        items = tail;
    }
    slices
}
