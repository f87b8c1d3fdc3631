//! Inbound event model.
//!
//! [`ProxyEvent`] mirrors the API Gateway "Lambda proxy" request shape and
//! [`InvocationContext`] carries the platform context untouched. Both are
//! lenient on input: missing fields and explicit `null`s decode to empty
//! values so the router never fails on partial platform data.
//!
//! Requests already decoded by `aws_lambda_events` convert with
//! [`ProxyEvent::from_gateway_request`].

use std::collections::BTreeMap;

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EventResult;
use crate::serde_ext::null_as_default;

/// One HTTP-style invocation as delivered by the platform.
///
/// Field names follow the wire format (`httpMethod`, `resource`,
/// `queryStringParameters`, ...).
///
/// # Example
///
/// ```rust
/// use alpr_core::ProxyEvent;
///
/// let event = ProxyEvent::from_json(
///     r#"{"httpMethod": "GET", "resource": "/users/{id}", "pathParameters": {"id": "7"}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(event.method(), "GET");
/// assert_eq!(event.resource_path(), "/users/{id}");
/// assert!(event.query_string_parameters.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    /// HTTP verb, compared verbatim against route method matchers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub http_method: String,

    /// Resource template the gateway matched (e.g. `/users/{id}`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource: String,

    /// Concrete request path (e.g. `/users/7`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,

    /// Request headers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,

    /// Query string parameters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: BTreeMap<String, String>,

    /// Values captured by the gateway for `{placeholders}` in the resource.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_parameters: BTreeMap<String, String>,

    /// Deployment stage variables.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_variables: BTreeMap<String, String>,

    /// Undecoded request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Whether `body` is base64 encoded.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,

    /// Gateway request context, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub request_context: Value,
}

impl ProxyEvent {
    /// Decodes an event from JSON text.
    pub fn from_json(json: &str) -> EventResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes an event from an already parsed JSON value.
    pub fn from_value(value: Value) -> EventResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Converts an `aws_lambda_events` REST API request.
    ///
    /// Header names come out lowercased, as `HeaderMap` stores them; only the
    /// first value of a repeated header or query parameter is kept.
    pub fn from_gateway_request(request: &ApiGatewayProxyRequest) -> EventResult<Self> {
        Self::from_value(serde_json::to_value(request)?)
    }

    /// Returns the HTTP method routes are matched against.
    pub fn method(&self) -> &str {
        &self.http_method
    }

    /// Returns the resource path routes are matched against.
    pub fn resource_path(&self) -> &str {
        &self.resource
    }

    /// Returns the gateway-assigned request id from `requestContext.requestId`.
    pub fn request_id(&self) -> Option<&str> {
        self.request_context.get("requestId").and_then(Value::as_str)
    }
}

/// Platform metadata about the current execution.
///
/// Opaque to the router: it is handed to handlers exactly as received.
/// The accessors only exist so the runtime can log request identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationContext(Value);

impl Default for InvocationContext {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl InvocationContext {
    /// Wraps a raw context value. `null` becomes an empty object.
    pub fn new(value: Value) -> Self {
        if value.is_null() {
            Self::default()
        } else {
            Self(value)
        }
    }

    /// Returns the raw context value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the context, returning the raw value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns the platform request id (`awsRequestId`).
    pub fn request_id(&self) -> Option<&str> {
        self.0.get("awsRequestId").and_then(Value::as_str)
    }

    /// Returns the name of the function being invoked (`functionName`).
    pub fn function_name(&self) -> Option<&str> {
        self.0.get("functionName").and_then(Value::as_str)
    }
}

impl From<Value> for InvocationContext {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
