//! Core error types for respite-core.
//!
//! Only an unknown preset id is a recoverable engine error. Intents that do
//! not apply to the current cycle state are no-ops, not errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::PresetId;

/// Core error type for respite-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A preset id that is not present in the registry.
    #[error("Unknown preset: {id}")]
    UnknownPreset { id: PresetId },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The shared engine lock was poisoned by a panicking holder.
    #[error("Engine lock poisoned")]
    Poisoned,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_preset_message_names_the_id() {
        let err = CoreError::UnknownPreset { id: 42 };
        assert_eq!(err.to_string(), "Unknown preset: 42");
    }

    #[test]
    fn config_error_converts_into_core_error() {
        let err: CoreError = ConfigError::InvalidValue {
            key: "snooze_secs".into(),
            message: "must be greater than zero".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(err.to_string().contains("snooze_secs"));
    }
}
