// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Random: Send {
    /// Uniform sample in `[0, 1)`
    fn unit(&mut self) -> f32;

    /// Uniform sample in `[lower, upper)`
    fn uniform(&mut self, lower: f32, upper: f32) -> f32 {
        lower + (upper - lower) * self.unit()
    }
}

/// Reproducible generator; one instance per chunk keeps parallel runs deterministic
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator for one chunk; stream `seed` itself is left to initialization
    pub fn for_chunk(seed: u64, chunk: usize) -> Self {
        Self::new(seed.wrapping_add(chunk as u64 + 1))
    }
}

impl Random for SeededRandom {
    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}
