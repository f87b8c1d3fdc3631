//! alpr Runtime - configuration, logging and the invocation entry point.
//!
//! This crate provides:
//! - Layered configuration (`AlprConfig`, `ConfigLoader`) via figment
//! - Logging setup over `tracing-subscriber` (`LoggingBuilder`)
//! - Decoding of raw invocation payloads (`Invocation`)
//! - `AlprRuntime::invoke`, which routes one invocation inside a span
//!   carrying its request identifiers
//!
//! ```rust,ignore
//! use alpr_runtime::{AlprRuntime, Invocation};
//! use alpr_framework::rules;
//!
//! let runtime = AlprRuntime::new();
//! let invocation = Invocation::from_json(payload)?;
//!
//! runtime.invoke(invocation, send_to_platform, |router| {
//!     router.route(rules::get("/health", |_req, res| res.send("ok")));
//! });
//! ```

pub mod config;
pub mod error;
pub mod invocation;
pub mod logging;
pub mod runtime;

pub use config::{AlprConfig, ConfigError, ConfigLoader, ConfigResult};
pub use error::{RuntimeError, RuntimeResult};
pub use invocation::Invocation;
pub use logging::{LoggingBuilder, SpanEvents};
pub use runtime::{AlprRuntime, RuntimeBuilder};

// Re-export tracing for use by handler crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// Provides the commonly used logging macros and `Level`.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
