//! Per-process runtime that routes each invocation.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use alpr_runtime::{AlprRuntime, Invocation};
//! use alpr_framework::rules;
//!
//! // Once per cold start: load alpr.toml, set up logging.
//! let runtime = AlprRuntime::new();
//!
//! // Once per invocation.
//! let dispatched = runtime.invoke(invocation, callback, |router| {
//!     router.route(rules::get("/ping", |_req, res| res.send("pong")));
//!     router.route(rules::any("/{proxy+}", |_req, res| res.send(())));
//! });
//! ```

use tracing::{info, info_span, warn};

use alpr_core::{InvocationError, ResponseEnvelope};
use alpr_framework::Router;

use crate::config::{AlprConfig, ConfigLoader, load_config};
use crate::error::RuntimeResult;
use crate::invocation::Invocation;
use crate::logging;

/// Loaded configuration plus the entry point for invocations.
///
/// Create one per process and reuse it across warm invocations.
#[derive(Debug, Clone)]
pub struct AlprRuntime {
    config: AlprConfig,
}

impl Default for AlprRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl AlprRuntime {
    /// Creates a runtime with automatic configuration loading.
    ///
    /// Falls back to default settings if configuration cannot be loaded.
    pub fn new() -> Self {
        let config = load_config().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config ({e}), using defaults");
            AlprConfig::default()
        });

        Self::from_config(&config)
    }

    /// Creates a runtime builder for custom configuration.
    ///
    /// ```rust,ignore
    /// let runtime = AlprRuntime::builder()
    ///     .config_file("alpr.production.toml")
    ///     .build()?;
    /// ```
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from an already loaded configuration.
    ///
    /// Installs the global subscriber unless one is already set.
    pub fn from_config(config: &AlprConfig) -> Self {
        logging::init_from_config(&config.logging);

        info!(
            log_level = %config.logging.level,
            log_format = ?config.logging.format,
            "Runtime initialized"
        );

        Self {
            config: config.clone(),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &AlprConfig {
        &self.config
    }

    /// Routes one invocation.
    ///
    /// Builds a router for `invocation`, hands it to `routes` so the caller
    /// can offer its rules in order, and reports whether any rule
    /// dispatched. Everything runs inside an `invocation` span carrying the
    /// request identifiers.
    ///
    /// When nothing matched the callback is never called; the runtime only
    /// logs a warning, if so configured.
    pub fn invoke<C, F>(&self, invocation: Invocation, callback: C, routes: F) -> bool
    where
        C: Fn(Result<ResponseEnvelope, InvocationError>) + Send + Sync + 'static,
        F: FnOnce(&mut Router),
    {
        let Invocation { event, context } = invocation;

        let span = info_span!(
            "invocation",
            request_id = context.request_id().unwrap_or_default(),
            gateway_request_id = event.request_id().unwrap_or_default(),
            function = context.function_name().unwrap_or_default(),
            method = %event.method(),
            resource = %event.resource_path(),
        );
        let _enter = span.enter();

        if self.config.invocation.log_request_ids {
            info!(
                request_id = ?context.request_id(),
                gateway_request_id = ?event.request_id(),
                "Invocation started"
            );
        }

        let mut router = Router::new(event, context, callback);
        routes(&mut router);

        let dispatched = router.is_dispatched();
        if !dispatched && self.config.invocation.warn_on_unmatched {
            warn!(
                method = %router.event().method(),
                resource = %router.event().resource_path(),
                "No route matched the event, no response will be sent"
            );
        }

        dispatched
    }

    /// Decodes `payload` with [`Invocation::from_json`] and routes it.
    pub fn invoke_json<C, F>(&self, payload: &str, callback: C, routes: F) -> RuntimeResult<bool>
    where
        C: Fn(Result<ResponseEnvelope, InvocationError>) + Send + Sync + 'static,
        F: FnOnce(&mut Router),
    {
        let invocation = Invocation::from_json(payload)?;
        Ok(self.invoke(invocation, callback, routes))
    }
}

/// Builder for [`AlprRuntime`].
#[derive(Debug)]
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new(),
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g., "development", "production").
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges configuration values programmatically.
    pub fn merge(mut self, config: AlprConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Loads configuration and builds the runtime.
    pub fn build(self) -> RuntimeResult<AlprRuntime> {
        let config = self.config_loader.load()?;
        Ok(AlprRuntime::from_config(&config))
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::RuntimeError;
    use alpr_core::EventError;
    use alpr_framework::testing::CapturedResponses;
    use alpr_framework::{Envelope, RequestView, Responder, rules};

    fn runtime() -> AlprRuntime {
        AlprRuntime::from_config(&AlprConfig::default())
    }

    fn invocation(method: &str, resource: &str) -> Invocation {
        Invocation::from_value(json!({
            "event": {
                "httpMethod": method,
                "resource": resource,
                "pathParameters": { "id": "42" },
                "requestContext": { "requestId": "gw-1" }
            },
            "context": { "awsRequestId": "req-1", "functionName": "users" }
        }))
        .unwrap()
    }

    #[test]
    fn test_invoke_dispatches_first_match() {
        let captured = CapturedResponses::new();
        let callback = captured.callback();

        let dispatched = runtime().invoke(
            invocation("GET", "/users/{id}"),
            move |result| callback(result),
            |router| {
                router.route(rules::post("/users/{id}", |_req: RequestView, res: Responder| {
                    res.send("wrong verb")
                }));
                router.route(rules::get("/users/{id}", |req: RequestView, res: Responder| {
                    res.send(Envelope::new().status(200).body(req.path_parameters()["id"].clone()))
                }));
                router.route(rules::any("/users/{id}", |_req: RequestView, res: Responder| {
                    res.send("too late")
                }));
            },
        );

        assert!(dispatched);
        assert_eq!(captured.single().unwrap().body, "\"42\"");
    }

    #[test]
    fn test_invoke_unmatched_sends_nothing() {
        let captured = CapturedResponses::new();
        let callback = captured.callback();

        let dispatched = runtime().invoke(
            invocation("DELETE", "/users/{id}"),
            move |result| callback(result),
            |router| {
                router.route(rules::get("/users/{id}", |_req: RequestView, res: Responder| {
                    res.send(())
                }));
            },
        );

        assert!(!dispatched);
        assert!(captured.is_empty());
    }

    #[test]
    fn test_invoke_json() {
        let captured = CapturedResponses::new();
        let callback = captured.callback();

        let dispatched = runtime()
            .invoke_json(
                r#"{ "event": { "httpMethod": "GET", "resource": "/ping" } }"#,
                move |result| callback(result),
                |router| {
                    router.route(rules::get("/ping", |_req: RequestView, res: Responder| {
                        res.send("pong")
                    }));
                },
            )
            .unwrap();

        assert!(dispatched);
        assert_eq!(captured.single().unwrap().status_code, 200);
    }

    #[test]
    fn test_invoke_json_rejects_bad_payload() {
        let result = runtime().invoke_json("[]", |_| {}, |_router| {});
        assert!(matches!(
            result,
            Err(RuntimeError::Event(EventError::InvalidShape { .. }))
        ));
    }

    #[test]
    fn test_builder_merges_config() {
        let mut overrides = AlprConfig::default();
        overrides.invocation.warn_on_unmatched = false;

        let runtime = AlprRuntime::builder()
            .search_path(std::env::temp_dir().join("alpr-no-config-here"))
            .without_env()
            .merge(overrides)
            .build()
            .unwrap();

        assert!(!runtime.config().invocation.warn_on_unmatched);
        assert!(runtime.config().invocation.log_request_ids);
    }

    #[test]
    fn test_builder_missing_file() {
        let result = AlprRuntime::builder()
            .config_file("/nonexistent/alpr.toml")
            .build();
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }
}
