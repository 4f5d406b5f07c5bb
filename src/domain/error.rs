//! Domain error types

use thiserror::Error;

/// A duration string that is not `<n>h<n>m<n>s` or is zero
#[derive(Debug, Clone, Error)]
#[error("Invalid duration \"{input}\": use hours, minutes and seconds in that order, e.g. 90s, 15m, 1h30m")]
pub struct DurationParseError {
    pub input: String,
}

#[derive(Debug, Clone, Error)]
#[error("Unknown notification backend \"{input}\" (expected notify-rust or notify-send)")]
pub struct InvalidBackendError {
    pub input: String,
}

/// Configuration file and value errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Malformed config at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Cannot write {path}: {message}")]
    Write { path: String, message: String },

    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

impl ConfigError {
    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
