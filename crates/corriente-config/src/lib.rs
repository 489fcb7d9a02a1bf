//! Pipeline configuration for corriente nodes.
//!
//! Configuration is a small TOML surface with defaults for every field, so
//! an empty file (or no file at all) yields a working pipeline on the
//! system default devices:
//!
//! ```toml
//! [capture]
//! device = "USB"          # index or name; unset = system default
//!
//! [playback]
//! device = "0"
//! amplitude = 0.8
//!
//! [tone]
//! frequency = [440.0, 880.0]
//! amplitude = [1.0, 0.25]
//! resolution = 200
//! ```
//!
//! [`PipelineConfig::load`] reads, parses, and validates in one step;
//! every constraint violation surfaces as a [`ConfigError`] before any
//! node is constructed.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Convenience result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Capture node settings.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Playback node settings.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Tone generator settings.
    #[serde(default)]
    pub tone: ToneConfig,
}

/// Capture node settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Input device selector: numeric index or name; unset = system default.
    #[serde(default)]
    pub device: Option<String>,
}

/// Playback node settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Output device selector: numeric index or name; unset = system default.
    #[serde(default)]
    pub device: Option<String>,
    /// Gain factor applied to every sample before it is queued.
    #[serde(default = "default_playback_amplitude")]
    pub amplitude: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            device: None,
            amplitude: default_playback_amplitude(),
        }
    }
}

fn default_playback_amplitude() -> f32 {
    1.0
}

/// Tone generator settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ToneConfig {
    /// Partial frequencies in Hz; pairs with `amplitude` one-to-one.
    #[serde(default = "default_tone_frequencies")]
    pub frequency: Vec<f64>,
    /// Partial amplitudes; pairs with `frequency` one-to-one.
    #[serde(default = "default_tone_amplitudes")]
    pub amplitude: Vec<f64>,
    /// Generated points per second.
    #[serde(default = "default_tone_resolution")]
    pub resolution: u32,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency: default_tone_frequencies(),
            amplitude: default_tone_amplitudes(),
            resolution: default_tone_resolution(),
        }
    }
}

fn default_tone_frequencies() -> Vec<f64> {
    vec![440.0]
}

fn default_tone_amplitudes() -> Vec<f64> {
    vec![1.0]
}

fn default_tone_resolution() -> u32 {
    200
}

impl PipelineConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the cross-field constraints serde cannot express.
    ///
    /// All violations are fatal: the pipeline refuses to construct nodes
    /// from an invalid configuration.
    pub fn validate(&self) -> Result<()> {
        if self.tone.frequency.len() != self.tone.amplitude.len() {
            return Err(ConfigError::MismatchedToneLists {
                frequencies: self.tone.frequency.len(),
                amplitudes: self.tone.amplitude.len(),
            });
        }
        if self.tone.frequency.is_empty() {
            return Err(ConfigError::EmptyTone);
        }
        if self.tone.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        for &value in &self.tone.amplitude {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidAmplitude { value });
            }
        }
        let playback = f64::from(self.playback.amplitude);
        if !playback.is_finite() || playback < 0.0 {
            return Err(ConfigError::InvalidAmplitude { value: playback });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.playback.amplitude, 1.0);
        assert_eq!(config.tone.frequency, vec![440.0]);
        assert_eq!(config.tone.resolution, 200);
        assert!(config.capture.device.is_none());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: PipelineConfig = toml::from_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [playback]
            amplitude = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.playback.amplitude, 0.5);
        assert!(config.playback.device.is_none());
        assert_eq!(config.tone, ToneConfig::default());
    }

    #[test]
    fn mismatched_tone_lists_are_rejected() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [tone]
            frequency = [440.0, 880.0]
            amplitude = [1.0]
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MismatchedToneLists {
                frequencies: 2,
                amplitudes: 1,
            })
        ));
    }

    #[test]
    fn empty_tone_lists_are_rejected() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [tone]
            frequency = []
            amplitude = []
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTone)));
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [tone]
            resolution = 0
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::ZeroResolution)));
    }

    #[test]
    fn negative_amplitude_is_rejected() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [playback]
            amplitude = -2.0
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAmplitude { .. })
        ));
    }

    #[test]
    fn non_finite_tone_amplitude_is_rejected() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [tone]
            frequency = [440.0]
            amplitude = [nan]
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAmplitude { .. })
        ));
    }
}
