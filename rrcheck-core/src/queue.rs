//! Bounded event buffers used by the recorder
//!
//! Producers never block: a push onto a full `HistoryQueue` loses one event
//! according to the queue's `OverflowPolicy`.

use crossbeam_queue::ArrayQueue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a full history queue gives up when another event arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Discard the incoming event; the first `capacity` events stay visible
    #[default]
    DropNewest,
    /// Evict the oldest buffered event; the last `capacity` events stay visible
    DropOldest,
}

/// Fixed-capacity FIFO of recorder events
///
/// Safe for one producer and one consumer on different threads.
pub struct HistoryQueue<T> {
    buf: ArrayQueue<T>,
    overflow: OverflowPolicy,
}

impl<T> HistoryQueue<T> {
    /// Create a queue holding at most `capacity` events
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self { buf: ArrayQueue::new(capacity), overflow }
    }

    /// Append an event without blocking
    ///
    /// Returns `false` if an event was lost to make room (or the new one was
    /// discarded).
    pub fn push(&self, item: T) -> bool {
        match self.overflow {
            OverflowPolicy::DropNewest => self.buf.push(item).is_ok(),
            OverflowPolicy::DropOldest => self.buf.force_push(item).is_none(),
        }
    }

    /// Pop the oldest buffered event
    pub fn try_recv(&self) -> Option<T> {
        self.buf.pop()
    }

    /// Pop every buffered event, oldest first
    pub fn drain(&self) -> Vec<T> {
        std::iter::from_fn(|| self.buf.pop()).collect()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }
}

impl<T> fmt::Debug for HistoryQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryQueue")
            .field("len", &self.buf.len())
            .field("capacity", &self.buf.capacity())
            .field("overflow", &self.overflow)
            .finish()
    }
}
