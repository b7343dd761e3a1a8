// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;

/// Dimensions of the search space
pub const DIMENSIONS: usize = 2;

/// A point in the search space together with the objective value there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: [f32; DIMENSIONS],
    pub value: f32,
}

impl Sample {
    /// Keep the sample with the smaller value; ties go to `b`
    pub fn better(a: Sample, b: Sample) -> Sample {
        if a.value < b.value {
            a
        } else {
            b
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "( {:.4}, {:.4} ) -> {:.4}",
            self.position[0], self.position[1], self.value
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub current: Sample,
    /// Best sample this particle has visited
    pub best: Sample,
    pub velocity: [f32; DIMENSIONS],
}
