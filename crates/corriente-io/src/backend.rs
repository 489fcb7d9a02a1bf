//! Pluggable audio device capability.
//!
//! The transport nodes never talk to a platform audio API directly; they
//! consume the [`AudioBackend`] trait, which covers exactly what they need
//! from a device layer: enumerate devices, query a device's default sample
//! rate for a direction, and open a mono stream that invokes a callback on
//! every hardware buffer. The default implementation wraps
//! [cpal](https://crates.io/crates/cpal) (see
//! [`CpalBackend`](crate::CpalBackend)); tests substitute a deterministic
//! mock that drives the callbacks by hand.
//!
//! The trait uses boxed closures for callbacks rather than generic
//! parameters, making it object-safe so nodes can hold
//! `Box<dyn AudioBackend>` and backends can be selected at runtime. Stream
//! handles are type-erased: dropping a [`StreamHandle`] stops the stream
//! and closes the device, which gives every stream a context-managed
//! lifetime regardless of how the node's worker exits.

use crate::Result;
use std::fmt;

/// Audio device information for diagnostic listings.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Whether the device supports audio input.
    pub is_input: bool,
    /// Whether the device supports audio output.
    pub is_output: bool,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
}

/// Which way samples flow through a device stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Capture: the device produces samples.
    Input,
    /// Playback: the device consumes samples.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Device selection, resolved to a concrete device once at node
/// construction and never re-queried afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeviceSelector {
    /// The system default device for the stream's direction.
    #[default]
    Default,
    /// Zero-based index into the enumerated devices for the direction.
    Index(usize),
    /// Device name: exact match first, then case-insensitive substring.
    Name(String),
}

impl DeviceSelector {
    /// Parse an optional configuration value.
    ///
    /// Unset means the system default; a numeric value selects by index;
    /// anything else selects by name.
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            None => Self::Default,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(index) => Self::Index(index),
                Err(_) => Self::Name(raw.to_string()),
            },
        }
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Index(index) => write!(f, "#{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Configuration for opening a node's device stream.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Which device to open.
    pub selector: DeviceSelector,
    /// Channel count; the transport is mono.
    pub channels: u16,
    /// Sample rate in Hz, from the construction-time query.
    pub sample_rate: u32,
}

impl NodeConfig {
    /// Mono stream config at the queried rate.
    pub fn mono(selector: DeviceSelector, sample_rate: u32) -> Self {
        Self {
            selector,
            channels: 1,
            sample_rate,
        }
    }
}

/// Capture callback signature.
///
/// Invoked by the audio subsystem on its own thread with each hardware
/// buffer of fresh samples. Must complete within a few milliseconds; it may
/// block briefly on the handoff guard but never on device I/O or the
/// pipeline scheduler.
pub type InputCallback = Box<dyn FnMut(&[f32]) + Send>;

/// Playback callback signature.
///
/// Invoked by the audio subsystem with a buffer it expects filled with
/// exactly that many output samples. Same timing bounds as
/// [`InputCallback`].
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Error callback signature.
///
/// Invoked when the backend reports a streaming fault (driver overrun,
/// underrun, device loss). Faults are non-fatal to the transport; nodes
/// log them and continue.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Type-erased audio stream handle.
///
/// Wraps a backend-specific stream object. The stream runs while this
/// handle exists; dropping it stops the stream and closes the device,
/// which is how the worker's exit path releases the hardware on every
/// route out, error or not.
pub struct StreamHandle {
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    /// Wrap a backend-specific stream object, keeping it alive until the
    /// handle is dropped.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// The device capability the transport nodes consume.
///
/// Object-safe and `Send`: a node queries the rate on its own thread, then
/// moves the backend into the worker that opens and holds the stream.
pub trait AudioBackend: Send {
    /// Human-readable backend name (e.g. "cpal", "mock").
    fn name(&self) -> &str;

    /// Enumerate available devices for diagnostic listings.
    fn list_devices(&self) -> Result<Vec<AudioDevice>>;

    /// Default sample rate the selected device reports for the direction.
    ///
    /// Performed once per node at construction; failure (invalid selector,
    /// query error) aborts construction.
    fn default_sample_rate(&self, selector: &DeviceSelector, direction: Direction) -> Result<u32>;

    /// Open a capture stream.
    ///
    /// `callback` runs on the hardware thread with each buffer of fresh
    /// samples; `error_callback` receives driver fault reports. The stream
    /// starts before this returns and runs until the handle is dropped.
    fn build_input_stream(
        &self,
        config: &NodeConfig,
        callback: InputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;

    /// Open a playback stream.
    ///
    /// `callback` must fill each requested buffer. Same lifetime contract
    /// as [`build_input_stream`](AudioBackend::build_input_stream).
    fn build_output_stream(
        &self,
        config: &NodeConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;
}

/// Log the backend's device listing once, at node startup.
pub(crate) fn log_device_listing(backend: &dyn AudioBackend) {
    match backend.list_devices() {
        Ok(devices) => {
            tracing::info!(
                backend = backend.name(),
                count = devices.len(),
                "audio devices available"
            );
            for device in &devices {
                tracing::debug!(
                    name = %device.name,
                    input = device.is_input,
                    output = device.is_output,
                    rate = device.default_sample_rate,
                    "device"
                );
            }
        }
        Err(err) => tracing::warn!(error = %err, "device enumeration failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_from_config() {
        assert_eq!(DeviceSelector::from_config(None), DeviceSelector::Default);
        assert_eq!(
            DeviceSelector::from_config(Some("3")),
            DeviceSelector::Index(3)
        );
        assert_eq!(
            DeviceSelector::from_config(Some(" 12 ")),
            DeviceSelector::Index(12)
        );
        assert_eq!(
            DeviceSelector::from_config(Some("USB Audio")),
            DeviceSelector::Name("USB Audio".to_string())
        );
    }

    #[test]
    fn selector_display() {
        assert_eq!(DeviceSelector::Default.to_string(), "default");
        assert_eq!(DeviceSelector::Index(2).to_string(), "#2");
        assert_eq!(DeviceSelector::Name("USB".into()).to_string(), "USB");
    }

    #[test]
    fn mono_config() {
        let config = NodeConfig::mono(DeviceSelector::Default, 44100);
        assert_eq!(config.channels, 1);
        assert_eq!(config.sample_rate, 44100);
    }

    #[test]
    fn stream_handle_debug() {
        let handle = StreamHandle::new(7u32);
        assert!(format!("{handle:?}").contains("StreamHandle"));
    }
}
