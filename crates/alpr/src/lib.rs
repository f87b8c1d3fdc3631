//! # alpr
//!
//! First-match request routing for AWS Lambda functions behind an API
//! Gateway proxy integration.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────┐  first match  ┌─────────┐  normalize  ┌──────────┐
//! │  Invocation  │────▶│ Router  │──────────────▶│ Handler │────────────▶│ callback │
//! │ event + ctx  │     │ (rules) │               │         │  Responder  │          │
//! └──────────────┘     └─────────┘               └─────────┘             └──────────┘
//! ```
//!
//! - **Core** (`alpr::core`): proxy event, request view, response envelope
//! - **Framework** (`alpr::framework`): matchers, rules, router, responder
//! - **Runtime** (`alpr::runtime`): configuration, logging, invocation entry point
//!
//! Rules are offered to the router in declaration order. The first rule
//! whose method and resource both match runs its handler; every later rule
//! is ignored. If nothing matches, no response is produced.
//!
//! ## Quick Start
//!
//! ```rust
//! use alpr::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let event = ProxyEvent::from_json(
//!     r#"{"httpMethod": "GET", "resource": "/users/{id}", "pathParameters": {"id": "7"}}"#,
//! )
//! .unwrap();
//!
//! let sent = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&sent);
//! let mut router = Router::new(event, InvocationContext::default(), move |result| {
//!     sink.lock().unwrap().push(result)
//! });
//!
//! router.route(rules::post("/users", |_req: RequestView, res: Responder| res.send(())));
//! router.route(rules::get("/users/{id}", |req: RequestView, res: Responder| {
//!     res.send(
//!         Envelope::new()
//!             .header("Content-Type", "application/json")
//!             .body(req.path_parameters()["id"].clone()),
//!     )
//! }));
//!
//! let sent = sent.lock().unwrap();
//! let response = sent[0].as_ref().unwrap();
//! assert_eq!(response.status_code, 200);
//! assert_eq!(response.body, "\"7\"");
//! ```
//!
//! ## Features
//!
//! - `toml-config` *(default)*: read `alpr.toml`
//! - `yaml-config`: read `alpr.yaml`
//! - `json-log`: JSON log lines

pub use alpr_core as core;
pub use alpr_framework as framework;
pub use alpr_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use alpr::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use alpr_runtime::{AlprConfig, AlprRuntime, Invocation, RuntimeError, RuntimeResult};

    // Routing
    pub use alpr_framework::{
        Handler, Responder, RouteMatcher, RouteRule, Router, method_matches, route_matches, rules,
    };

    // Event and response model
    pub use alpr_core::{
        Envelope, EventError, InvocationContext, InvocationError, Payload, ProxyEvent,
        RequestView, ResponseEnvelope,
    };

    // Logging macros
    pub use alpr_runtime::prelude::*;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::prelude::*;
    use alpr_framework::testing::CapturedResponses;

    fn router_for(method: &str, resource: &str, captured: &CapturedResponses) -> Router {
        let event = ProxyEvent::from_value(json!({
            "httpMethod": method,
            "resource": resource,
            "queryStringParameters": { "page": "2" },
            "body": "{\"name\":\"ada\"}"
        }))
        .unwrap();

        Router::builder()
            .event(event)
            .shared_callback(captured.callback())
            .build()
            .unwrap()
    }

    #[test]
    fn test_prelude_end_to_end() {
        let captured = CapturedResponses::new();
        let mut router = router_for("PUT", "/users", &captured);

        let missed = router.route(rules::get("/users", |_req: RequestView, res: Responder| {
            res.send(())
        }));
        let hit = router.route(RouteRule::new(
            ["PUT", "PATCH"],
            "/users",
            |req: RequestView, res: Responder| {
                let params = req.all_params();
                res.send(Envelope::new().status(201).body(json!({
                    "name": params["name"],
                    "page": params["page"],
                })));
                "handled"
            },
        ));

        assert!(missed.is_none());
        assert_eq!(hit, Some("handled"));

        let response = captured.single().unwrap();
        assert_eq!(response.status_code, 201);
        assert_eq!(
            response.body_json().unwrap(),
            json!({ "name": "ada", "page": "2" })
        );
    }

    #[test]
    fn test_unmatched_invocation_is_silent() {
        let captured = CapturedResponses::new();
        let mut router = router_for("OPTIONS", "/users", &captured);

        router.route(rules::get("/users", |_req: RequestView, res: Responder| res.send(())));

        assert!(!router.is_dispatched());
        assert!(captured.is_empty());
    }
}
