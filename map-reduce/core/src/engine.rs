// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::partitioner;
use crate::worker::{RoundContext, Worker};
use crate::{
    BlockingQueue, Command, EngineConfig, EngineError, Mapper, MapperFactory, Partial,
    QueueTopology, SharedInput,
};
use log::{info, trace, warn};
use parking_lot::Mutex;
use std::ops::Range;
use std::sync::Arc;

/// Persistent pool that runs one map-reduce round per `compute` call
///
/// Workers and their chunks are created once and reused for every round,
/// which is what makes thousands of short rounds cheap. Each round is a
/// barrier: `compute` returns only after every worker has answered, so a
/// worker never sees the reference of another round.
///
/// The engine must be shut down with `stop`. Dropping it without doing so
/// still stops and joins the workers, but logs a warning.
pub struct MapReduceEngine<T, R> {
    context: Arc<RoundContext<T, R>>,
    inboxes: Vec<Arc<BlockingQueue<Command<R>>>>,
    workers: Vec<Worker>,
    config: EngineConfig,
    rounds: u64,
}

impl<T, R> MapReduceEngine<T, R>
where
    T: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Builds an engine that owns its input
    pub fn new<M, F>(
        elements: Vec<T>,
        map_fn: M,
        reduce_fn: F,
        config: EngineConfig,
    ) -> Result<Self, EngineError>
    where
        M: Fn(&mut T, &R) -> R + Send + Sync + 'static,
        F: Fn(R, R) -> R + Send + Sync + 'static,
    {
        Self::with_input(SharedInput::new(elements), map_fn, reduce_fn, config)
    }

    /// Builds an engine over a handle the caller keeps
    ///
    /// The caller may read or replace the contents between rounds through
    /// its own clone of `input`.
    pub fn with_input<M, F>(
        input: SharedInput<T>,
        map_fn: M,
        reduce_fn: F,
        config: EngineConfig,
    ) -> Result<Self, EngineError>
    where
        M: Fn(&mut T, &R) -> R + Send + Sync + 'static,
        F: Fn(R, R) -> R + Send + Sync + 'static,
    {
        let map_fn = Arc::new(map_fn);
        let factory = move |_chunk: usize| {
            let map_fn = Arc::clone(&map_fn);
            move |element: &mut T, reference: &R| (*map_fn)(element, reference)
        };
        Self::with_mappers(input, factory, reduce_fn, config)
    }

    /// Builds an engine with one mapper per chunk, created by `factory`
    pub fn with_mappers<MF, F>(
        input: SharedInput<T>,
        mut factory: MF,
        reduce_fn: F,
        config: EngineConfig,
    ) -> Result<Self, EngineError>
    where
        MF: MapperFactory<T, R>,
        F: Fn(R, R) -> R + Send + Sync + 'static,
    {
        if config.workers == 0 {
            return Err(EngineError::NoWorkers);
        }
        if input.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let chunks = partitioner::partition(input.len(), config.workers);
        let mappers = (0..config.workers)
            .map(|chunk| {
                let mapper: Box<dyn Mapper<T, R>> = Box::new(factory.create_mapper(chunk));
                Mutex::new(mapper)
            })
            .collect();

        let context = Arc::new(RoundContext {
            input,
            chunks,
            mappers,
            reduce: Box::new(reduce_fn),
            results: BlockingQueue::new(),
        });

        let inbox_count = match config.topology {
            QueueTopology::PerWorker => config.workers,
            QueueTopology::Shared => 1,
        };
        let inboxes = (0..inbox_count)
            .map(|_| Arc::new(BlockingQueue::new()))
            .collect();

        let mut engine = Self {
            context,
            inboxes,
            workers: Vec::with_capacity(config.workers),
            config,
            rounds: 0,
        };

        // Workers spawned before a failure are stopped by Drop
        for id in 0..engine.config.workers {
            let worker = Worker::spawn(
                id,
                Arc::clone(engine.inbox(id)),
                Arc::clone(&engine.context),
                engine.config.pinning,
            )?;
            engine.workers.push(worker);
        }

        info!(
            "Map-reduce engine started: {} workers over {} elements ({:?} inbox)",
            engine.config.workers,
            engine.context.input.len(),
            engine.config.topology
        );

        Ok(engine)
    }

    /// Runs one round and returns its aggregate
    ///
    /// Every worker folds its chunk seeded with `reference`; the partials are
    /// then folded into `reference` in chunk order. If a mapper panicked the
    /// round is still drained completely before the failure is reported, so
    /// the next round starts clean.
    pub fn compute(&mut self, reference: R) -> Result<R, EngineError> {
        let workers = self.workers.len();

        for chunk in 0..workers {
            self.inbox(chunk).push(Command::Go {
                chunk,
                reference: reference.clone(),
            });
        }

        // Barrier
        let mut partials: Vec<Option<R>> = (0..workers).map(|_| None).collect();
        let mut failure: Option<(usize, String)> = None;
        for _ in 0..workers {
            match self.context.results.pop() {
                Partial::Done { chunk, value } => partials[chunk] = Some(value),
                Partial::Failed { chunk, message } => {
                    warn!("Chunk {} failed in round {}: {}", chunk, self.rounds, message);
                    let lowest = failure.as_ref().map_or(true, |(first, _)| chunk < *first);
                    if lowest {
                        failure = Some((chunk, message));
                    }
                }
            }
        }

        self.rounds += 1;

        if let Some((chunk, message)) = failure {
            return Err(EngineError::ChunkFailed { chunk, message });
        }

        let reduce = &self.context.reduce;
        let aggregate = partials
            .into_iter()
            .flatten()
            .fold(reference, |acc, partial| reduce(acc, partial));

        trace!("Round {} complete", self.rounds);
        Ok(aggregate)
    }

    /// Stops every worker and returns the input handle
    ///
    /// Consumes the engine: no round can run after this.
    pub fn stop(mut self) -> Result<SharedInput<T>, EngineError> {
        let rounds = self.rounds;
        self.shutdown()?;
        info!("Map-reduce engine stopped after {} rounds", rounds);
        Ok(self.context.input.clone())
    }

    pub fn input(&self) -> &SharedInput<T> {
        &self.context.input
    }
}

impl<T, R> MapReduceEngine<T, R> {
    pub fn worker_count(&self) -> usize {
        self.config.workers
    }

    pub fn chunks(&self) -> &[Range<usize>] {
        &self.context.chunks
    }

    /// Number of rounds run so far
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    fn inbox(&self, chunk: usize) -> &Arc<BlockingQueue<Command<R>>> {
        &self.inboxes[chunk % self.inboxes.len()]
    }

    /// One Stop per spawned worker, then join them all
    fn shutdown(&mut self) -> Result<(), EngineError> {
        let workers = std::mem::take(&mut self.workers);

        for id in 0..workers.len() {
            self.inbox(id).push(Command::Stop);
        }

        let mut outcome = Ok(());
        for worker in workers {
            if let Err(e) = worker.join() {
                warn!("{}", e);
                if outcome.is_ok() {
                    outcome = Err(e);
                }
            }
        }
        outcome
    }
}

impl<T, R> Drop for MapReduceEngine<T, R> {
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        warn!(
            "Map-reduce engine dropped without stop(), shutting down {} workers",
            self.workers.len()
        );
        let _ = self.shutdown();
    }
}
