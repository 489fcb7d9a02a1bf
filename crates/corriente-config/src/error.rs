//! Error types for pipeline configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Tone frequency and amplitude lists must pair up one-to-one.
    #[error("tone lists must match: {frequencies} frequencies, {amplitudes} amplitudes")]
    MismatchedToneLists {
        /// Number of configured frequencies.
        frequencies: usize,
        /// Number of configured amplitudes.
        amplitudes: usize,
    },

    /// The tone requires at least one partial.
    #[error("tone requires at least one partial")]
    EmptyTone,

    /// The tone resolution must be positive.
    #[error("tone resolution must be positive")]
    ZeroResolution,

    /// Amplitudes must be finite and non-negative.
    #[error("invalid amplitude {value}")]
    InvalidAmplitude {
        /// The rejected value.
        value: f64,
    },
}
