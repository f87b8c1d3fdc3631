//! Error types for the alpr framework.

use thiserror::Error;

/// Errors raised while constructing a [`Router`](crate::Router).
///
/// This is the only failure the router surfaces. Route misses are `None`
/// and malformed handler output is normalized.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No completion callback was supplied.
    #[error("a completion callback is required to build a router")]
    MissingCallback,
}

/// Result type for router construction.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
