//! Decoding a raw invocation into its event and context.

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use serde_json::Value;

use alpr_core::{EventError, EventResult, InvocationContext, ProxyEvent};
use alpr_framework::{Router, RouterBuilder};

/// One Lambda invocation: the proxy event plus platform context.
///
/// The JSON form is an object with optional `event` and `context` members:
///
/// ```json
/// { "event": { "httpMethod": "GET", "resource": "/ping" }, "context": { "awsRequestId": "…" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// The proxy event to route.
    pub event: ProxyEvent,
    /// Platform context, handed to handlers untouched.
    pub context: InvocationContext,
}

impl Invocation {
    /// Pairs an already decoded event with its context.
    pub fn new(event: ProxyEvent, context: InvocationContext) -> Self {
        Self { event, context }
    }

    /// Decodes an invocation from JSON text.
    pub fn from_json(json: &str) -> EventResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Decodes an invocation from a parsed JSON value.
    ///
    /// Missing or `null` members become an empty event or context. Anything
    /// other than an object at the top level is rejected.
    pub fn from_value(value: Value) -> EventResult<Self> {
        let Value::Object(mut parts) = value else {
            return Err(EventError::invalid_shape(
                "expected an object with `event` and `context` members",
            ));
        };

        let event = match parts.remove("event") {
            None | Some(Value::Null) => ProxyEvent::default(),
            Some(event @ Value::Object(_)) => ProxyEvent::from_value(event)?,
            Some(_) => return Err(EventError::invalid_shape("`event` must be an object")),
        };
        let context = parts
            .remove("context")
            .map(InvocationContext::new)
            .unwrap_or_default();

        Ok(Self { event, context })
    }

    /// Builds an invocation from a request decoded by `aws_lambda_events`.
    pub fn from_gateway_request(
        request: &ApiGatewayProxyRequest,
        context: impl Into<InvocationContext>,
    ) -> EventResult<Self> {
        Ok(Self {
            event: ProxyEvent::from_gateway_request(request)?,
            context: context.into(),
        })
    }

    /// Returns a router builder preloaded with this invocation.
    ///
    /// Only the completion callback is left to set.
    pub fn router_builder(self) -> RouterBuilder {
        Router::builder().event(self.event).context(self.context)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use alpr_framework::ConfigurationError;

    #[test]
    fn test_from_json() {
        let invocation = Invocation::from_json(
            r#"{
                "event": {
                    "httpMethod": "POST",
                    "resource": "/orders/{id}",
                    "pathParameters": { "id": "7" },
                    "queryStringParameters": null,
                    "body": "{\"qty\":2}"
                },
                "context": { "awsRequestId": "req-1", "functionName": "orders" }
            }"#,
        )
        .unwrap();

        assert_eq!(invocation.event.method(), "POST");
        assert_eq!(invocation.event.resource_path(), "/orders/{id}");
        assert_eq!(invocation.event.path_parameters["id"], "7");
        assert!(invocation.event.query_string_parameters.is_empty());
        assert_eq!(invocation.context.request_id(), Some("req-1"));
        assert_eq!(invocation.context.function_name(), Some("orders"));
    }

    #[test]
    fn test_missing_parts_default() {
        let invocation = Invocation::from_value(json!({})).unwrap();
        assert_eq!(invocation, Invocation::default());

        let invocation = Invocation::from_value(json!({ "event": null, "context": null })).unwrap();
        assert_eq!(invocation.context, InvocationContext::default());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            Invocation::from_value(json!([1, 2])),
            Err(EventError::InvalidShape { .. })
        ));
        assert!(matches!(
            Invocation::from_value(json!({ "event": "GET /" })),
            Err(EventError::InvalidShape { .. })
        ));
        assert!(matches!(
            Invocation::from_value(json!({ "event": { "headers": 5 } })),
            Err(EventError::Decode(_))
        ));
        assert!(matches!(
            Invocation::from_json("{ not json"),
            Err(EventError::Decode(_))
        ));
    }

    #[test]
    fn test_from_gateway_request() {
        let request = ApiGatewayProxyRequest {
            resource: Some("/health".to_string()),
            ..Default::default()
        };

        let invocation =
            Invocation::from_gateway_request(&request, json!({ "awsRequestId": "req-9" })).unwrap();

        assert_eq!(invocation.event.method(), "GET");
        assert_eq!(invocation.event.resource_path(), "/health");
        assert_eq!(invocation.context.request_id(), Some("req-9"));
    }

    #[test]
    fn test_router_builder_needs_callback() {
        let invocation = Invocation::from_value(json!({ "event": { "httpMethod": "GET" } })).unwrap();

        let result = invocation.clone().router_builder().build();
        assert!(matches!(result, Err(ConfigurationError::MissingCallback)));

        let router = invocation.router_builder().callback(|_| {}).build().unwrap();
        assert_eq!(router.event().method(), "GET");
        assert!(!router.is_dispatched());
    }
}
