//! Error types for the Camunda client.

use camunda_core::DecodeError;
use thiserror::Error;

/// Errors that can occur when talking to the engine.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration value, detected when the profile is resolved.
    #[error("invalid configuration {key}={value:?}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Connection failure, timeout or other transport-level error.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The engine answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response whose body was not valid JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// The response JSON could not be turned into an entity.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl ClientError {
    /// True for failures originating from the transport or a response status.
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// HTTP status code, if the engine answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
