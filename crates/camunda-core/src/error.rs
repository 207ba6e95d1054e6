//! Decode errors.

use thiserror::Error;

/// Errors raised while building an entity from an engine JSON payload.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// A required field was absent.
    #[error("{kind} is missing required field '{field}'")]
    MissingField { kind: &'static str, field: String },

    /// A field held a value of the wrong type or a malformed timestamp.
    #[error("{kind} has invalid value: {reason}")]
    InvalidValue { kind: &'static str, reason: String },

    /// The payload for a single entity was not a JSON object.
    #[error("{kind} payload is not a JSON object")]
    NotAnObject { kind: &'static str },

    /// The payload for a collection was not a JSON array.
    #[error("expected a JSON array of {kind}")]
    NotAnArray { kind: &'static str },
}

impl DecodeError {
    /// Classify a serde error raised while decoding an entity of `kind`.
    pub fn from_serde(kind: &'static str, err: serde_json::Error) -> Self {
        let reason = err.to_string();
        match reason
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => Self::MissingField {
                kind,
                field: field.to_string(),
            },
            None => Self::InvalidValue { kind, reason },
        }
    }
}
