//! Signal generators for the corriente pipeline.
//!
//! Generators are [`Source`](corriente_core::Source) nodes that produce
//! batches against wall-clock time instead of a device clock: each poll
//! covers the elapsed interval since the previous one at a fixed
//! points-per-second resolution, and successive batches tile the timeline
//! with neither gap nor overlap. Periodic generators carry their phase
//! across polls so the waveform stays continuous at batch boundaries
//! regardless of poll jitter.

mod sine;

pub use sine::Sine;

use thiserror::Error;

/// Errors raised when a generator is misconfigured.
///
/// All of these are construction-time failures: a generator is never
/// created in an invalid state.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Frequency and amplitude lists must pair up one-to-one.
    #[error("mismatched partial lists: {frequencies} frequencies, {amplitudes} amplitudes")]
    MismatchedPartials {
        /// Number of configured frequencies.
        frequencies: usize,
        /// Number of configured amplitudes.
        amplitudes: usize,
    },

    /// At least one partial is required.
    #[error("no partials configured")]
    NoPartials,

    /// Points-per-second must be positive.
    #[error("resolution must be positive")]
    ZeroResolution,
}

/// Convenience result type for generator construction.
pub type Result<T> = std::result::Result<T, SignalError>;
