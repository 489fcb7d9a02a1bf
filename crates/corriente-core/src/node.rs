//! Lifecycle traits between nodes and the external pipeline scheduler.
//!
//! The scheduler owns the cadence: once per cooperative tick it calls
//! [`Source::poll`] on producing nodes and, when a batch came out, hands it
//! to the interested [`Sink`]s. Nodes never call each other and never call
//! these hooks themselves. Ticks are not reentrant.

use crate::TimestampedBatch;

/// A node that emits batches toward the pipeline.
///
/// Object-safe so schedulers can hold `Box<dyn Source>`.
pub trait Source {
    /// Called once per scheduler tick.
    ///
    /// Returns everything that accumulated since the previous poll as a
    /// single batch, or `None` when nothing accumulated. `None` is the
    /// normal idle result, not an error; the poll never waits for data.
    fn poll(&mut self) -> Option<TimestampedBatch>;

    /// Ask the node to stop.
    ///
    /// Idempotent, non-blocking, and infallible: background resources shut
    /// down on their own cadence after this returns.
    fn shutdown(&mut self);
}

/// A node that consumes batches from the pipeline.
pub trait Sink {
    /// Called when the upstream produced a batch this tick.
    ///
    /// The scheduler checks readiness first; a sink is never polled
    /// without data.
    fn poll(&mut self, batch: &TimestampedBatch);

    /// Ask the node to stop. Same contract as [`Source::shutdown`].
    fn shutdown(&mut self);
}
