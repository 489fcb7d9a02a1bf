//! Realtime audio transport for the corriente pipeline.
//!
//! This crate bridges two incompatible timing domains: a realtime hardware
//! callback that fires once per device buffer on its own high-priority
//! thread, and a cooperative pipeline tick that polls on an unrelated
//! schedule and wants discrete, wall-clock-timestamped batches.
//!
//! - [`CaptureNode`]: input device to timestamped batches
//! - [`PlaybackNode`]: queued batches to an output device
//! - [`HandoffBuffer`]: the guarded FIFO the two sides share
//! - [`AudioBackend`] / [`CpalBackend`]: the device capability and its
//!   default cpal implementation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use corriente_core::{Sink, Source};
//! use corriente_io::{CaptureNode, CpalBackend, DeviceSelector, PlaybackNode};
//!
//! let mut capture = CaptureNode::new(Box::new(CpalBackend::new()), DeviceSelector::Default)?;
//! let mut playback = PlaybackNode::new(Box::new(CpalBackend::new()), DeviceSelector::Default, 1.0)?;
//!
//! // Driven by the pipeline scheduler, one tick at a time:
//! if let Some(batch) = capture.poll() {
//!     playback.poll(&batch);
//! }
//! ```

mod backend;
mod capture;
mod cpal_backend;
mod handoff;
mod playback;

pub use backend::{
    AudioBackend, AudioDevice, DeviceSelector, Direction, ErrorCallback, InputCallback,
    NodeConfig, OutputCallback, StreamHandle,
};
pub use capture::CaptureNode;
pub use cpal_backend::CpalBackend;
pub use handoff::HandoffBuffer;
pub use playback::PlaybackNode;

/// Error types for the audio transport.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

/// Convenience result type for transport operations.
pub type Result<T> = std::result::Result<T, Error>;
