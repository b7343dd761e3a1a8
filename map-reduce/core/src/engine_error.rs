// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

/// Errors surfaced by the map-reduce engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The pool needs at least one worker
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// Nothing to partition
    #[error("input collection is empty")]
    EmptyInput,

    /// Replacement input does not match the partitioned length
    #[error("input length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The mapper panicked while folding a chunk
    #[error("chunk {chunk} failed: {message}")]
    ChunkFailed { chunk: usize, message: String },

    /// A worker thread panicked outside the fold and could not be joined cleanly
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
