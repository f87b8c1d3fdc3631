//! Error types for the alpr core.
//!
//! Routing itself never fails at request time: a miss is `None` and a
//! malformed payload is normalized. The errors here cover decoding raw
//! platform input and the error slot of the completion callback.

use thiserror::Error;

// =============================================================================
// Event Errors
// =============================================================================

/// Errors that can occur while decoding a platform payload into an event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventError {
    /// The payload was not valid JSON or had the wrong field types.
    #[error("failed to decode proxy event: {0}")]
    Decode(String),

    /// The payload decoded, but its top-level shape is unusable.
    #[error("invalid invocation payload: {reason}")]
    InvalidShape {
        /// Reason for rejection.
        reason: String,
    },
}

impl EventError {
    /// Creates an invalid shape error.
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

// =============================================================================
// Invocation Errors
// =============================================================================

/// Error delivered through the error slot of the completion callback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    /// The handler reported a failure instead of a response.
    #[error("handler failed: {0}")]
    Handler(String),
}

impl InvocationError {
    /// Creates a handler failure.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for event decoding.
pub type EventResult<T> = Result<T, EventError>;
