//! Error types for the biblioteca client.
//!
//! # Design
//! Endpoint methods never return these directly: every failure is folded
//! into an [`ApiResponse::Failure`] through [`ApiError::status`] and the
//! error's `Display` text. The enum exists so the internal steps (transport,
//! decoding, local validation) can use `?` and so the non-envelope helpers
//! (file encoding) have a real error type.
//!
//! [`ApiResponse::Failure`]: crate::envelope::ApiResponse::Failure

use thiserror::Error;

/// Status reported when a failure carries no HTTP status of its own.
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Status reported for local validation failures.
pub const VALIDATION_ERROR_STATUS: u16 = 400;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused, DNS,
    /// TLS, body read failure).
    #[error("{message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    /// A success response body was not valid JSON.
    #[error("invalid JSON in response body: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A required field was absent, null or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// The request payload had the wrong overall shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A success response did not have the shape the operation needs.
    #[error("unexpected response payload: {0}")]
    UnexpectedPayload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
            status: None,
        }
    }

    /// Status code to report in the failure envelope.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Transport { status, .. } => status.unwrap_or(DEFAULT_ERROR_STATUS),
            ApiError::MissingField(_) | ApiError::InvalidPayload(_) => VALIDATION_ERROR_STATUS,
            ApiError::Deserialization(_)
            | ApiError::Serialization(_)
            | ApiError::UnexpectedPayload(_)
            | ApiError::Io(_) => DEFAULT_ERROR_STATUS,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport {
            message: error.to_string(),
            status: error.status().map(|s| s.as_u16()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Serialization(error.to_string())
    }
}
