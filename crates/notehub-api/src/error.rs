//! Error types for the NoteHub API client
//!
//! Three failure classes, surfaced unchanged to callers:
//! - Transport failures (network or unmapped HTTP status)
//! - Missing resources (HTTP 404)
//! - Server-side payload rejection (HTTP 400/422 on create)

use reqwest::StatusCode;

/// API request failure
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network failure or an HTTP status with no more specific mapping
    #[error("transport failure: {message}")]
    Transport {
        /// Human-readable cause
        message: String,
    },

    /// Referenced note does not exist (HTTP 404)
    #[error("note {id} not found")]
    NotFound {
        /// The requested note id
        id: String,
    },

    /// Server rejected an otherwise well-formed create payload
    #[error("payload rejected: {message}")]
    Validation {
        /// Server-provided rejection message
        message: String,
    },
}

impl ApiError {
    /// Transport error from an unexpected status code
    #[inline]
    #[must_use]
    pub fn unexpected_status(status: StatusCode) -> Self {
        Self::Transport {
            message: format!("unexpected status {status}"),
        }
    }

    /// Check whether the error is a missing-resource failure
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check whether the error is a server-side payload rejection
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Process configuration failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is absent
    #[error("environment variable {name} is not set")]
    Missing {
        /// Variable name
        name: &'static str,
    },

    /// Environment variable holds an unparseable value
    #[error("invalid value for {name}: {value}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// The rejected value
        value: String,
    },
}
