// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use map_reduce_core::partitioner::{chunk, partition};

#[test]
fn test_safety_chunks_cover_input_disjointly_in_order() {
    for n in 1..=64 {
        for workers in 1..=n {
            let chunks = partition(n, workers);
            assert_eq!(chunks.len(), workers);

            // Contiguous and in index order: each chunk starts where the previous ended
            let mut expected_start = 0;
            for c in &chunks {
                assert_eq!(c.start, expected_start, "n={} workers={}", n, workers);
                assert!(c.start <= c.end);
                expected_start = c.end;
            }
            assert_eq!(expected_start, n, "n={} workers={}", n, workers);
        }
    }
}

#[test]
fn test_safety_all_but_last_chunk_have_equal_size() {
    let chunks = partition(103, 10);
    for c in &chunks[..9] {
        assert_eq!(c.len(), 10);
    }
    assert_eq!(chunks[9], 90..103);
}

#[test]
fn test_safety_more_workers_than_elements_keeps_single_active_chunk() {
    let chunks = partition(3, 8);

    assert_eq!(chunks.len(), 8);
    assert_eq!(chunks[0], 0..3);
    for c in &chunks[1..] {
        assert!(c.is_empty());
        assert_eq!(c.start, 3);
    }
}

#[test]
fn test_safety_chunk_is_pure() {
    assert_eq!(chunk(2, 17, 4), chunk(2, 17, 4));
    assert_eq!(chunk(3, 17, 4), 12..17);
}
