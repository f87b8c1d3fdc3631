//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use alpr_core::EventError;

/// Errors that can occur while setting up the runtime or decoding an
/// invocation.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The invocation payload could not be decoded.
    #[error(transparent)]
    Event(#[from] EventError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
