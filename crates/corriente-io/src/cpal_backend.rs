//! cpal-based implementation of the audio device capability.
//!
//! Wraps [cpal](https://crates.io/crates/cpal) for cross-platform device
//! enumeration and stream construction: ALSA on Linux, CoreAudio on macOS,
//! WASAPI on Windows. Driver fault reports (overrun, underrun, device
//! loss) arrive through the stream error callback, which the transport
//! nodes log as warnings and survive.

use crate::backend::{
    AudioBackend, AudioDevice, DeviceSelector, Direction, ErrorCallback, InputCallback,
    NodeConfig, OutputCallback, StreamHandle,
};
use crate::{Error, Result};
use cpal::Host;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Extract a device's human-readable name (cpal 0.17 `description()`).
fn device_name(device: &cpal::Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio device capability backed by the platform's default cpal host.
pub struct CpalBackend {
    host: Host,
}

impl CpalBackend {
    /// Connect to the platform's default audio host.
    pub fn new() -> Self {
        tracing::info!(
            host = cpal::default_host().id().name(),
            "audio host initialized"
        );
        Self {
            host: cpal::default_host(),
        }
    }

    fn devices_for(&self, direction: Direction) -> Result<Vec<cpal::Device>> {
        let devices = match direction {
            Direction::Input => self.host.input_devices(),
            Direction::Output => self.host.output_devices(),
        };
        Ok(devices.map_err(|e| Error::Stream(e.to_string()))?.collect())
    }

    /// Resolve a selector to a concrete device: system default, index into
    /// the direction's enumeration, or name (exact, then case-insensitive
    /// substring).
    fn resolve(&self, selector: &DeviceSelector, direction: Direction) -> Result<cpal::Device> {
        match selector {
            DeviceSelector::Default => match direction {
                Direction::Input => self.host.default_input_device().ok_or(Error::NoDevice),
                Direction::Output => self.host.default_output_device().ok_or(Error::NoDevice),
            },
            DeviceSelector::Index(index) => {
                let devices = self.devices_for(direction)?;
                let count = devices.len();
                devices.into_iter().nth(*index).ok_or_else(|| {
                    Error::DeviceNotFound(format!(
                        "{direction} device index {index} (only {count} devices available)"
                    ))
                })
            }
            DeviceSelector::Name(search) => {
                let devices = self.devices_for(direction)?;
                for device in &devices {
                    if device_name(device).is_ok_and(|name| name == *search) {
                        return Ok(device.clone());
                    }
                }
                let search_lower = search.to_lowercase();
                for device in devices {
                    if let Ok(name) = device_name(&device)
                        && name.to_lowercase().contains(&search_lower)
                    {
                        return Ok(device);
                    }
                }
                Err(Error::DeviceNotFound(format!(
                    "no {direction} device matching '{search}'"
                )))
            }
        }
    }

    fn default_config(
        &self,
        device: &cpal::Device,
        direction: Direction,
    ) -> Result<cpal::SupportedStreamConfig> {
        match direction {
            Direction::Input => device.default_input_config(),
            Direction::Output => device.default_output_config(),
        }
        .map_err(|e| Error::Stream(e.to_string()))
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    fn name(&self) -> &'static str {
        "cpal"
    }

    fn list_devices(&self) -> Result<Vec<AudioDevice>> {
        let mut devices = Vec::new();

        if let Ok(inputs) = self.host.input_devices() {
            for device in inputs {
                if let Ok(name) = device_name(&device) {
                    let sample_rate = device
                        .default_input_config()
                        .map(|c| c.sample_rate())
                        .unwrap_or(48000);
                    let is_output = device.default_output_config().is_ok();
                    devices.push(AudioDevice {
                        name,
                        is_input: true,
                        is_output,
                        default_sample_rate: sample_rate,
                    });
                }
            }
        }

        if let Ok(outputs) = self.host.output_devices() {
            for device in outputs {
                if let Ok(name) = device_name(&device) {
                    if devices.iter().any(|d| d.name == name) {
                        continue;
                    }
                    let sample_rate = device
                        .default_output_config()
                        .map(|c| c.sample_rate())
                        .unwrap_or(48000);
                    devices.push(AudioDevice {
                        name,
                        is_input: false,
                        is_output: true,
                        default_sample_rate: sample_rate,
                    });
                }
            }
        }

        Ok(devices)
    }

    fn default_sample_rate(&self, selector: &DeviceSelector, direction: Direction) -> Result<u32> {
        let device = self.resolve(selector, direction)?;
        Ok(self.default_config(&device, direction)?.sample_rate())
    }

    fn build_input_stream(
        &self,
        config: &NodeConfig,
        mut callback: InputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let device = self.resolve(&config.selector, Direction::Input)?;

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    callback(data);
                },
                move |err| {
                    error_callback(&err.to_string());
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            selector = %config.selector,
            sample_rate = config.sample_rate,
            "capture stream opened"
        );

        Ok(StreamHandle::new(stream))
    }

    fn build_output_stream(
        &self,
        config: &NodeConfig,
        mut callback: OutputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let device = self.resolve(&config.selector, Direction::Output)?;

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback(data);
                },
                move |err| {
                    error_callback(&err.to_string());
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            selector = %config.selector,
            sample_rate = config.sample_rate,
            "playback stream opened"
        );

        Ok(StreamHandle::new(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_name() {
        let backend = CpalBackend::new();
        assert_eq!(backend.name(), "cpal");
    }

    #[test]
    fn list_devices_does_not_panic() {
        // Device availability depends on the system; the call itself must
        // succeed even on machines with no audio hardware.
        let backend = CpalBackend::new();
        assert!(backend.list_devices().is_ok());
    }
}
