//! Guarded sample hand-off between the hardware callback and the poll side.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// FIFO sample queue shared between exactly two parties: a stream node's
/// realtime hardware callback and its polling side.
///
/// All access goes through one mutex, and the critical section covers only
/// the copy in or out - never device I/O, never the scheduler - which
/// keeps the hardware side's blocking time bounded. Samples come out in
/// the order they went in regardless of how the two sides interleave.
///
/// For capture, the buffer also remembers the wall-clock instant of the
/// most recent append; the poll side uses it as the end anchor when it
/// reconstructs the batch's timestamp series.
#[derive(Debug, Default)]
pub struct HandoffBuffer {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    samples: VecDeque<f32>,
    last_append: Option<DateTime<Utc>>,
}

impl HandoffBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append samples to the back of the queue, recording the instant the
    /// append completed.
    ///
    /// Never fails; the queue grows as needed. The recorded instant stands
    /// in for the capture time of the last sample currently queued.
    pub fn append(&self, samples: &[f32]) {
        let mut inner = self.lock();
        inner.samples.extend(samples.iter().copied());
        inner.last_append = Some(Utc::now());
    }

    /// Atomically remove and return all pending samples together with the
    /// most recent append instant.
    pub fn drain_all(&self) -> (Vec<f32>, Option<DateTime<Utc>>) {
        let mut inner = self.lock();
        let samples = inner.samples.drain(..).collect();
        (samples, inner.last_append)
    }

    /// Atomically remove exactly `n` samples from the front.
    ///
    /// When fewer than `n` are queued, nothing is removed and `None` is
    /// returned: the caller substitutes silence for the whole request and
    /// the queued samples wait for the next callback. Underrun is the
    /// steady state of an under-filled queue, not an error.
    pub fn take(&self, n: usize) -> Option<Vec<f32>> {
        let mut inner = self.lock();
        if inner.samples.len() < n {
            return None;
        }
        Some(inner.samples.drain(..n).collect())
    }

    /// Number of queued samples.
    pub fn len(&self) -> usize {
        self.lock().samples.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().samples.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned guard only means the other side panicked mid-copy;
        // the queue itself is still structurally sound.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
