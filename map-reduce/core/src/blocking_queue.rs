// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// Unbounded FIFO queue whose `pop` parks the caller until an item arrives.
///
/// Producers never block. Each queue in the engine has a single consumer,
/// so items are handed out in exactly the order they were pushed.
pub struct BlockingQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Condvar,
}

impl<T> BlockingQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    /// Enqueue an item and wake one waiting consumer
    pub fn push(&self, item: T) {
        let mut items = self.items.lock();
        items.push_back(item);
        drop(items);
        self.available.notify_one();
    }

    /// Block until an item is available, then return the oldest one
    pub fn pop(&self) -> T {
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop_front() {
                return item;
            }
            self.available.wait(&mut items);
        }
    }

    /// Non-blocking variant of `pop`
    pub fn try_pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
