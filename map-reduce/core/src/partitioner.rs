// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Static partitioning of `[0, n)` into one contiguous chunk per worker.
//!
//! Every worker but the last gets `n / worker_count` elements and the last one
//! absorbs the remainder. When there are more workers than elements the chunk
//! size falls back to `n`, so the first worker owns everything and the others
//! get empty ranges clamped to `[n, n)`.

use std::ops::Range;

/// Range of element indices owned by `worker_index`
pub fn chunk(worker_index: usize, n: usize, worker_count: usize) -> Range<usize> {
    debug_assert!(worker_count > 0, "worker_count must be at least 1");
    debug_assert!(worker_index < worker_count);

    let chunk_size = match n / worker_count {
        0 => n,
        size => size,
    };

    let start = (worker_index * chunk_size).min(n);
    let end = if worker_index == worker_count - 1 {
        n
    } else {
        ((worker_index + 1) * chunk_size).min(n)
    };

    start..end
}

/// Chunk table for the whole pool, indexed by worker
pub fn partition(n: usize, worker_count: usize) -> Vec<Range<usize>> {
    (0..worker_count)
        .map(|worker_index| chunk(worker_index, n, worker_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_goes_to_last_worker() {
        assert_eq!(partition(10, 3), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_single_worker_owns_everything() {
        assert_eq!(partition(7, 1), vec![0..7]);
    }

    #[test]
    fn test_more_workers_than_elements_falls_back_to_one_chunk() {
        let chunks = partition(3, 8);
        assert_eq!(chunks[0], 0..3);
        assert!(chunks[1..].iter().all(|c| c.is_empty()));
    }
}
