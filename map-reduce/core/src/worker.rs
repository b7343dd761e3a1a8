// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{BlockingQueue, Command, CorePinning, EngineError, Mapper, Partial, SharedInput};
use log::{debug, warn};
use parking_lot::Mutex;
use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub(crate) type ReduceFn<R> = dyn Fn(R, R) -> R + Send + Sync;

/// Everything the workers of one engine share for its whole lifetime
pub(crate) struct RoundContext<T, R> {
    pub input: SharedInput<T>,
    pub chunks: Vec<Range<usize>>,
    /// One mapper per chunk, so mapper state follows the chunk and not the thread
    pub mappers: Vec<Mutex<Box<dyn Mapper<T, R>>>>,
    pub reduce: Box<ReduceFn<R>>,
    pub results: BlockingQueue<Partial<R>>,
}

impl<T, R: Clone> RoundContext<T, R> {
    /// Fold one chunk left to right, starting from the reference
    ///
    /// A panicking mapper is turned into `Partial::Failed` so the round still
    /// receives an answer from this worker.
    pub fn fold_chunk(&self, chunk: usize, reference: &R) -> Partial<R> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut mapper = self.mappers[chunk].lock();
            let mut acc = reference.clone();
            for index in self.chunks[chunk].clone() {
                let mut element = self.input.lock(index);
                let mapped = mapper.map(&mut element, reference);
                acc = (self.reduce)(acc, mapped);
            }
            acc
        }));

        match outcome {
            Ok(value) => Partial::Done { chunk, value },
            Err(payload) => Partial::Failed {
                chunk,
                message: panic_message(payload.as_ref()),
            },
        }
    }
}

/// Handle to one persistent pool thread
pub(crate) struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

impl Worker {
    pub fn spawn<T, R>(
        id: usize,
        inbox: Arc<BlockingQueue<Command<R>>>,
        context: Arc<RoundContext<T, R>>,
        pinning: CorePinning,
    ) -> Result<Self, EngineError>
    where
        T: Send + 'static,
        R: Clone + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(format!("map-reduce-worker-{}", id))
            .spawn(move || {
                if pinning == CorePinning::RoundRobin {
                    pin_current_thread(id);
                }
                run(id, &inbox, &context);
            })?;

        Ok(Self { id, handle })
    }

    /// Waits for the worker thread to leave its loop
    pub fn join(self) -> Result<(), EngineError> {
        self.handle
            .join()
            .map_err(|_| EngineError::WorkerPanicked { worker: self.id })
    }
}

fn run<T, R: Clone>(id: usize, inbox: &BlockingQueue<Command<R>>, context: &RoundContext<T, R>) {
    debug!("Worker {} waiting for commands", id);

    loop {
        match inbox.pop() {
            Command::Go { chunk, reference } => {
                let partial = context.fold_chunk(chunk, &reference);
                context.results.push(partial);
            }
            Command::Stop => break,
        }
    }

    debug!("Worker {} stopped", id);
}

fn pin_current_thread(worker_id: usize) {
    let cores = match core_affinity::get_core_ids() {
        Some(cores) if !cores.is_empty() => cores,
        _ => {
            warn!(
                "Failed to get core IDs for worker {}, skipping affinity",
                worker_id
            );
            return;
        }
    };

    let core = cores[worker_id % cores.len()];
    if !core_affinity::set_for_current(core) {
        warn!("Failed to pin worker {} to core {}", worker_id, core.id);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "mapper panicked".to_string()
    }
}
