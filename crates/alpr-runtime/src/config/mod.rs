//! Configuration for the alpr runtime.
//!
//! Settings are layered with figment: built-in defaults, then TOML or YAML
//! files, then `ALPR_*` environment variables. See [`loader`] for the exact
//! order.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config};
pub use schema::{
    AlprConfig, InvocationConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig,
    SpanEventConfig,
};
pub use validation::validate_config;
