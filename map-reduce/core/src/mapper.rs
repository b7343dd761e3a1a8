// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Per-element map step run by a worker
///
/// Takes `&mut self` so that a mapper can carry private state across rounds
/// (a seeded generator, scratch buffers). Exactly one mapper exists per chunk.
pub trait Mapper<T, R>: Send {
    fn map(&mut self, element: &mut T, reference: &R) -> R;
}

impl<F, T, R> Mapper<T, R> for F
where
    F: FnMut(&mut T, &R) -> R + Send,
{
    fn map(&mut self, element: &mut T, reference: &R) -> R {
        (self)(element, reference)
    }
}

/// Trait for creating the mapper of each chunk
pub trait MapperFactory<T, R> {
    type Mapper: Mapper<T, R> + 'static;

    fn create_mapper(&mut self, chunk: usize) -> Self::Mapper;
}

impl<F, M, T, R> MapperFactory<T, R> for F
where
    F: FnMut(usize) -> M,
    M: Mapper<T, R> + 'static,
{
    type Mapper = M;

    fn create_mapper(&mut self, chunk: usize) -> M {
        (self)(chunk)
    }
}
