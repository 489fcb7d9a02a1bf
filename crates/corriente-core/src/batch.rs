//! Timestamped sample batches exchanged between pipeline nodes.

use chrono::{DateTime, Utc};

/// A bounded, ordered run of mono samples annotated with wall-clock
/// instants and the sample rate that applied when it was produced.
///
/// `samples` and `timestamps` are parallel sequences of equal length. The
/// timestamp series is always derived after the fact (see
/// [`Timebase`](crate::Timebase)); nothing in the transport stamps
/// individual samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampedBatch {
    /// Amplitude values in capture/render order.
    pub samples: Vec<f32>,
    /// Absolute instant of each sample, microsecond resolution.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Sample rate in Hz.
    pub rate: f64,
}

impl TimestampedBatch {
    /// Build a batch from parallel sample and timestamp sequences.
    ///
    /// The sequences must have equal length.
    pub fn new(samples: Vec<f32>, timestamps: Vec<DateTime<Utc>>, rate: f64) -> Self {
        debug_assert_eq!(samples.len(), timestamps.len());
        Self {
            samples,
            timestamps,
            rate,
        }
    }

    /// Number of samples in the batch.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the batch holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Instant of the last sample, if any.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }
}
