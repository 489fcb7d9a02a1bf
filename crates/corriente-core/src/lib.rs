//! Corriente Core - batch types and timestamp reconstruction.
//!
//! This crate holds the pieces shared by every corriente node:
//!
//! - [`TimestampedBatch`] - a bounded run of mono samples with a derived
//!   wall-clock timestamp series and the sample rate that applied when it
//!   was produced
//! - [`Timebase`] - reconstruction of per-sample instants from a sample
//!   count, a fixed rate, and a single recorded end instant
//! - [`Source`] / [`Sink`] - the lifecycle contract between a node and the
//!   external pipeline scheduler (`poll` once per tick, `shutdown` once at
//!   teardown)
//!
//! Nothing here touches an audio device; the transport lives in
//! `corriente-io` and the generators in `corriente-signal`.
//!
//! # Timing model
//!
//! Samples are never stamped individually. The capture transport records
//! one instant - the completion of the most recent hardware append - and
//! [`Timebase::end_to_series`] spreads the whole accumulated batch evenly
//! behind it. When several hardware callbacks contributed to one batch the
//! true instants are not uniform; the uniform series is a deliberate
//! approximation that downstream consumers rely on.

pub mod batch;
pub mod node;
pub mod timebase;

pub use batch::TimestampedBatch;
pub use node::{Sink, Source};
pub use timebase::{Timebase, span_series};
