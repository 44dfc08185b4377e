//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Missing required configuration field: '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

/// Line-list input errors (tokens, cast hashes)
#[derive(Error, Debug, Clone)]
pub enum InputError {
    #[error("No entries loaded from {path}")]
    Empty { path: String },

    #[error("I/O error reading {path}: {msg}")]
    Io { path: String, msg: String },
}

/// Transport-level failures. Any of these feeds the retry policy.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Request timeout after {timeout_ms}ms to {endpoint}")]
    Timeout { timeout_ms: u64, endpoint: String },

    #[error("Connection failed to {endpoint}: {reason}")]
    ConnectionFailed { endpoint: String, reason: String },

    #[error("Invalid request to {endpoint}: {reason}")]
    InvalidRequest { endpoint: String, reason: String },
}

impl NetworkError {
    pub fn endpoint(&self) -> &str {
        match self {
            NetworkError::Timeout { endpoint, .. }
            | NetworkError::ConnectionFailed { endpoint, .. }
            | NetworkError::InvalidRequest { endpoint, .. } => endpoint,
        }
    }
}
