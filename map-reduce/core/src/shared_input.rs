// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::EngineError;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Stable, cloneable handle to the engine's input collection
///
/// Each element sits behind its own lock. During a round only the worker that
/// owns an element's chunk touches it, so the locks are never contended; they
/// exist so the caller can keep a handle and read or swap the contents
/// between rounds.
pub struct SharedInput<T> {
    cells: Arc<Vec<Mutex<T>>>,
}

impl<T> SharedInput<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            cells: Arc::new(elements.into_iter().map(Mutex::new).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Run `f` against the element at `index`
    ///
    /// Returns None if the index is out of bounds
    pub fn with_element<U>(&self, index: usize, f: impl FnOnce(&mut T) -> U) -> Option<U> {
        self.cells.get(index).map(|cell| f(&mut cell.lock()))
    }

    /// Swap in a new backing collection of the same length
    ///
    /// Chunks are fixed when the engine is built, so the length cannot change.
    /// Returns the previous contents.
    pub fn replace(&self, elements: Vec<T>) -> Result<Vec<T>, EngineError> {
        if elements.len() != self.cells.len() {
            return Err(EngineError::LengthMismatch {
                expected: self.cells.len(),
                actual: elements.len(),
            });
        }

        Ok(self
            .cells
            .iter()
            .zip(elements)
            .map(|(cell, element)| std::mem::replace(&mut *cell.lock(), element))
            .collect())
    }

    /// Take the elements back once no other handle is alive
    pub fn try_into_vec(self) -> Result<Vec<T>, Self> {
        match Arc::try_unwrap(self.cells) {
            Ok(cells) => Ok(cells.into_iter().map(Mutex::into_inner).collect()),
            Err(cells) => Err(Self { cells }),
        }
    }

    pub(crate) fn lock(&self, index: usize) -> MutexGuard<'_, T> {
        self.cells[index].lock()
    }
}

impl<T: Clone> SharedInput<T> {
    /// Copy of the current contents, in index order
    pub fn snapshot(&self) -> Vec<T> {
        self.cells.iter().map(|cell| cell.lock().clone()).collect()
    }
}

impl<T> Clone for SharedInput<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Arc::clone(&self.cells),
        }
    }
}

impl<T> From<Vec<T>> for SharedInput<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}
