//! The request object handed to route handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::event::{InvocationContext, ProxyEvent};

/// Read-only projection over the event and context of one invocation.
///
/// The JSON body is decoded once, when the view is built. A missing or
/// undecodable body reads as an empty object; decode failures are never
/// surfaced to the handler.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use alpr_core::{InvocationContext, ProxyEvent, RequestView};
///
/// let mut event = ProxyEvent::default();
/// event.body = Some(r#"{"name": "body", "page": 1}"#.into());
/// event.query_string_parameters.insert("name".into(), "query".into());
///
/// let request = RequestView::new(Arc::new(event), Arc::new(InvocationContext::default()));
/// let params = request.all_params();
///
/// assert_eq!(params["name"], "query");
/// assert_eq!(params["page"], 1);
/// ```
#[derive(Debug, Clone)]
pub struct RequestView {
    event: Arc<ProxyEvent>,
    context: Arc<InvocationContext>,
    body: Value,
}

impl RequestView {
    /// Creates a view over the given event and context.
    pub fn new(event: Arc<ProxyEvent>, context: Arc<InvocationContext>) -> Self {
        let body = decode_body(event.body.as_deref());
        Self {
            event,
            context,
            body,
        }
    }

    /// Returns the raw invocation context.
    pub fn context_object(&self) -> &InvocationContext {
        &self.context
    }

    /// Returns the raw event.
    pub fn event_object(&self) -> &ProxyEvent {
        &self.event
    }

    /// Returns the stage variables, empty if the event carried none.
    pub fn stage_variables(&self) -> &BTreeMap<String, String> {
        &self.event.stage_variables
    }

    /// Returns the query string parameters, empty if the event carried none.
    pub fn query_string_parameters(&self) -> &BTreeMap<String, String> {
        &self.event.query_string_parameters
    }

    /// Returns the path parameters, empty if the event carried none.
    pub fn path_parameters(&self) -> &BTreeMap<String, String> {
        &self.event.path_parameters
    }

    /// Returns the request headers, empty if the event carried none.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.event.headers
    }

    /// Returns a single header by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.event.headers.get(name).map(String::as_str)
    }

    /// Returns the decoded JSON body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Returns the body exactly as received.
    pub fn raw_body(&self) -> Option<&str> {
        self.event.body.as_deref()
    }

    /// Merges body fields, path parameters and query parameters.
    ///
    /// Later sources win on key collisions: query > path > body. Only an
    /// object body contributes keys.
    pub fn all_params(&self) -> Map<String, Value> {
        let mut params = match &self.body {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };

        let overlays = self
            .event
            .path_parameters
            .iter()
            .chain(self.event.query_string_parameters.iter());
        for (key, value) in overlays {
            params.insert(key.clone(), Value::String(value.clone()));
        }

        params
    }
}

fn decode_body(raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return Value::Object(Map::new());
    };

    serde_json::from_str(raw).unwrap_or_else(|e| {
        debug!(error = %e, "Request body is not valid JSON, treating as empty");
        Value::Object(Map::new())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_event() -> ProxyEvent {
        ProxyEvent::from_value(json!({
            "resource": "/test/{testVar}",
            "httpMethod": "POST",
            "headers": { "Content-Type": "application/json" },
            "queryStringParameters": { "param1": "value1", "shared": "from-query" },
            "pathParameters": { "testVar": "hello", "shared": "from-path" },
            "stageVariables": { "stage": "dev" },
            "body": "{\"request\":\"data\",\"shared\":\"from-body\",\"count\":3}"
        }))
        .unwrap()
    }

    fn view(event: ProxyEvent) -> RequestView {
        let context = InvocationContext::from(json!({ "awsRequestId": "req-1" }));
        RequestView::new(Arc::new(event), Arc::new(context))
    }

    #[test]
    fn test_passthrough_objects() {
        let event = sample_event();
        let request = view(event.clone());

        assert_eq!(request.event_object(), &event);
        assert_eq!(request.context_object().request_id(), Some("req-1"));
    }

    #[test]
    fn test_map_accessors() {
        let request = view(sample_event());

        assert_eq!(request.stage_variables()["stage"], "dev");
        assert_eq!(request.query_string_parameters()["param1"], "value1");
        assert_eq!(request.path_parameters()["testVar"], "hello");
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("content-type"), None);
    }

    #[test]
    fn test_map_accessors_empty_when_absent() {
        let request = view(ProxyEvent::default());

        assert!(request.stage_variables().is_empty());
        assert!(request.query_string_parameters().is_empty());
        assert!(request.path_parameters().is_empty());
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_body_decoded() {
        let request = view(sample_event());

        assert_eq!(request.body()["request"], "data");
        assert_eq!(request.body()["count"], 3);
        assert_eq!(
            request.raw_body(),
            Some("{\"request\":\"data\",\"shared\":\"from-body\",\"count\":3}")
        );
    }

    #[test]
    fn test_body_missing_is_empty_object() {
        let request = view(ProxyEvent::default());

        assert_eq!(request.body(), &json!({}));
        assert_eq!(request.raw_body(), None);
    }

    #[test]
    fn test_body_invalid_json_is_empty_object() {
        let mut event = ProxyEvent::default();
        event.body = Some("name=alpr&kind=form".to_string());
        let request = view(event);

        assert_eq!(request.body(), &json!({}));
        assert_eq!(request.raw_body(), Some("name=alpr&kind=form"));
    }

    #[test]
    fn test_all_params_precedence() {
        let request = view(sample_event());
        let params = request.all_params();

        assert_eq!(params["param1"], "value1");
        assert_eq!(params["testVar"], "hello");
        assert_eq!(params["request"], "data");
        assert_eq!(params["count"], 3);
        assert_eq!(params["shared"], "from-query");
    }

    #[test]
    fn test_all_params_path_beats_body() {
        let mut event = sample_event();
        event.query_string_parameters.remove("shared");
        let params = view(event).all_params();

        assert_eq!(params["shared"], "from-path");
    }

    #[test]
    fn test_all_params_ignores_non_object_body() {
        let mut event = sample_event();
        event.body = Some("[1, 2, 3]".to_string());
        let request = view(event);

        assert_eq!(request.body(), &json!([1, 2, 3]));
        let params = request.all_params();
        assert_eq!(params.len(), 3);
        assert!(!params.contains_key("0"));
    }
}
