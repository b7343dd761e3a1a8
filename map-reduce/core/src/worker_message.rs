// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Commands sent from the engine to a worker's inbox
#[derive(Debug, Clone, PartialEq)]
pub enum Command<R> {
    /// Fold the given chunk, seeding the accumulator with the round's reference
    Go { chunk: usize, reference: R },
    /// Leave the worker loop for good
    Stop,
}

/// A worker's answer for one round
#[derive(Debug, Clone, PartialEq)]
pub enum Partial<R> {
    Done { chunk: usize, value: R },
    /// The mapper panicked somewhere inside the chunk
    Failed { chunk: usize, message: String },
}
