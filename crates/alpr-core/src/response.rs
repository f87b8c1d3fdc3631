//! Response model.
//!
//! Handlers produce a [`Payload`]; the responder in `alpr-framework`
//! normalizes it into a [`ResponseEnvelope`] for the completion callback.
//!
//! A payload is one of two explicit variants:
//!
//! - [`Payload::Raw`]: any JSON value, serialized whole as the response body
//!   with the default status code and no headers
//! - [`Payload::Envelope`]: an [`Envelope`] whose status code, headers and
//!   body are each honored when present and defaulted otherwise
//!
//! A raw object that happens to contain a `body` key stays raw.

use std::collections::BTreeMap;

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status code used when the handler does not supply a valid one.
pub const DEFAULT_STATUS_CODE: u32 = 200;

/// Serialized body used when an envelope carries no body.
pub const EMPTY_BODY: &str = "{}";

/// Wire names owned by [`ResponseEnvelope`]; extra fields may not reuse them.
pub const RESERVED_ENVELOPE_FIELDS: [&str; 3] = ["statusCode", "headers", "body"];

/// What a handler hands to its responder.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Arbitrary data; the whole value becomes the body.
    Raw(Value),
    /// An explicit response with optional status, headers and body.
    Envelope(Envelope),
}

impl Payload {
    /// Creates a raw payload from anything convertible to a JSON value.
    pub fn raw(value: impl Into<Value>) -> Self {
        Self::Raw(value.into())
    }

    /// Creates a raw payload by serializing `value`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(Self::Raw(serde_json::to_value(value)?))
    }
}

/// An absent payload reads as an empty object.
impl Default for Payload {
    fn default() -> Self {
        Self::Raw(Value::Object(Map::new()))
    }
}

impl From<()> for Payload {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Raw(Value::String(text.to_owned()))
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Raw(Value::String(text))
    }
}

impl From<Envelope> for Payload {
    fn from(envelope: Envelope) -> Self {
        Self::Envelope(envelope)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(payload: Option<T>) -> Self {
        payload.map(Into::into).unwrap_or_default()
    }
}

/// A handler-built response whose parts are defaulted independently.
///
/// # Example
///
/// ```rust
/// use alpr_core::Envelope;
/// use serde_json::json;
///
/// let envelope = Envelope::new()
///     .status(201)
///     .header("Location", "/users/7")
///     .body(json!({ "id": 7 }));
///
/// assert_eq!(envelope.status_code, Some(201));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    /// Requested status code; must be a positive integer to be honored.
    pub status_code: Option<i64>,
    /// Response headers.
    pub headers: Option<BTreeMap<String, String>>,
    /// Body value, serialized to JSON text on delivery.
    pub body: Option<Value>,
    /// Additional fields copied verbatim onto the delivered envelope.
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Creates an envelope with every part unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status code.
    pub fn status(mut self, status_code: i64) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Adds a single header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replaces all headers.
    pub fn headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets the body value.
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a pass-through field such as `isBase64Encoded`.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Sets the `isBase64Encoded` pass-through flag.
    pub fn base64_encoded(self, encoded: bool) -> Self {
        self.extra("isBase64Encoded", encoded)
    }
}

/// The normalized response delivered to the completion callback.
///
/// `status_code` is always a positive integer and `body` is always JSON
/// text. Serializes with the gateway's wire names, with `extra` flattened
/// alongside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status_code: u32,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded body.
    pub body: String,
    /// Pass-through fields from the handler's envelope.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Decodes the body text back into a JSON value.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }

    /// Converts to the `aws_lambda_events` REST API response type.
    ///
    /// Extra fields the response type knows (`isBase64Encoded`,
    /// `multiValueHeaders`) are carried over; the rest are dropped.
    pub fn to_gateway_response(&self) -> serde_json::Result<ApiGatewayProxyResponse> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}
