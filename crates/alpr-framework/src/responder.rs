//! Response normalization.
//!
//! A [`Responder`] wraps the completion callback for one dispatched
//! request. Whatever [`Payload`] the handler sends is normalized into a
//! [`ResponseEnvelope`] before it reaches the callback:
//!
//! | Payload           | statusCode                    | headers          | body                   |
//! |-------------------|-------------------------------|------------------|------------------------|
//! | `Raw(value)`      | 200                           | `{}`             | JSON of `value`        |
//! | `Envelope { .. }` | status if positive, else 200  | headers or `{}`  | JSON of body, or `{}`  |
//!
//! Envelope `extra` fields are copied through, except the three names the
//! envelope owns.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use alpr_core::{
    DEFAULT_STATUS_CODE, EMPTY_BODY, Envelope, InvocationError, Payload,
    RESERVED_ENVELOPE_FIELDS, ResponseEnvelope,
};

/// The completion callback a router delivers through.
///
/// Receives `Ok(envelope)` for responses and `Err(error)` when a handler
/// reports a failure with [`Responder::fail`].
pub type Callback = Arc<dyn Fn(Result<ResponseEnvelope, InvocationError>) + Send + Sync>;

/// Normalizing wrapper around the completion callback.
///
/// Cheap to clone and `Send + 'static`, so an asynchronous handler can move
/// it into a task and respond later. Each call delivers exactly once; the
/// responder does not stop a handler from responding more than once.
#[derive(Clone)]
pub struct Responder {
    callback: Callback,
}

impl Responder {
    pub(crate) fn new(callback: Callback) -> Self {
        Self { callback }
    }

    /// Normalizes `payload` and delivers it.
    ///
    /// `()` sends an empty object, strings and JSON values are sent as raw
    /// payloads, and an [`Envelope`] controls status and headers.
    pub fn send(&self, payload: impl Into<Payload>) {
        let envelope = normalize(payload.into());
        debug!(
            status_code = envelope.status_code,
            body_len = envelope.body.len(),
            "Delivering response"
        );
        (self.callback)(Ok(envelope));
    }

    /// Delivers `error` through the callback's error slot.
    pub fn fail(&self, error: InvocationError) {
        debug!(error = %error, "Delivering handler failure");
        (self.callback)(Err(error));
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder").finish_non_exhaustive()
    }
}

/// Turns any handler payload into a well-formed envelope.
///
/// Total: every payload yields an envelope with a positive status code,
/// a header map and a JSON body.
pub fn normalize(payload: Payload) -> ResponseEnvelope {
    match payload {
        Payload::Raw(value) => ResponseEnvelope {
            status_code: DEFAULT_STATUS_CODE,
            headers: Default::default(),
            body: serialize_body(&value),
            extra: Default::default(),
        },
        Payload::Envelope(envelope) => normalize_envelope(envelope),
    }
}

fn normalize_envelope(envelope: Envelope) -> ResponseEnvelope {
    let Envelope {
        status_code,
        headers,
        body,
        mut extra,
    } = envelope;

    let status_code = match status_code {
        None => DEFAULT_STATUS_CODE,
        Some(code) => match u32::try_from(code) {
            Ok(code) if code > 0 => code,
            _ => {
                warn!(
                    status_code = code,
                    "Status code is not a positive integer, using default"
                );
                DEFAULT_STATUS_CODE
            }
        },
    };

    let body = match &body {
        Some(value) => serialize_body(value),
        None => EMPTY_BODY.to_owned(),
    };

    for field in RESERVED_ENVELOPE_FIELDS {
        if extra.remove(field).is_some() {
            warn!(field, "Dropping extra field that shadows an envelope field");
        }
    }

    ResponseEnvelope {
        status_code,
        headers: headers.unwrap_or_default(),
        body,
        extra,
    }
}

fn serialize_body(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to serialize response body, sending empty object");
        EMPTY_BODY.to_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    type Deliveries = Arc<Mutex<Vec<Result<ResponseEnvelope, InvocationError>>>>;

    fn recording_responder() -> (Responder, Deliveries) {
        let seen: Deliveries = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let responder = Responder::new(Arc::new(
            move |result: Result<ResponseEnvelope, InvocationError>| sink.lock().push(result),
        ));
        (responder, seen)
    }

    #[test]
    fn test_raw_string() {
        let envelope = normalize(Payload::from("Hello World!"));

        assert_eq!(envelope.status_code, 200);
        assert!(envelope.headers.is_empty());
        assert_eq!(envelope.body, "\"Hello World!\"");
        assert!(envelope.extra.is_empty());
    }

    #[test]
    fn test_full_envelope() {
        let envelope = normalize(
            Envelope::new()
                .status(400)
                .header("data", "field")
                .body(json!({ "foo": "bar" }))
                .into(),
        );

        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.headers.len(), 1);
        assert_eq!(envelope.headers["data"], "field");
        assert_eq!(envelope.body, r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_absent_payload_is_empty_object() {
        let envelope = normalize(Payload::from(()));

        assert_eq!(envelope.status_code, 200);
        assert!(envelope.headers.is_empty());
        assert_eq!(envelope.body, "{}");
    }

    #[test]
    fn test_envelope_without_body() {
        let envelope = normalize(Envelope::new().status(204).into());

        assert_eq!(envelope.status_code, 204);
        assert_eq!(envelope.body, EMPTY_BODY);
    }

    #[test]
    fn test_envelope_parts_default_independently() {
        let envelope = normalize(Envelope::new().body("just a body").into());

        assert_eq!(envelope.status_code, 200);
        assert!(envelope.headers.is_empty());
        assert_eq!(envelope.body, "\"just a body\"");
    }

    #[test]
    fn test_envelope_with_only_headers() {
        let envelope = normalize(Envelope::new().header("X-Req", "1").into());

        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.headers.len(), 1);
        assert_eq!(envelope.headers["X-Req"], "1");
        assert_eq!(envelope.body, EMPTY_BODY);
    }

    #[test]
    fn test_non_positive_status_replaced() {
        for code in [0, -1, i64::from(u32::MAX) + 1] {
            let envelope = normalize(Envelope::new().status(code).into());
            assert_eq!(envelope.status_code, DEFAULT_STATUS_CODE, "code {code}");
        }
    }

    #[test]
    fn test_raw_object_with_envelope_keys_is_body() {
        let raw = json!({ "statusCode": 500, "headers": { "a": "b" }, "body": "x" });
        let envelope = normalize(Payload::from(raw.clone()));

        assert_eq!(envelope.status_code, 200);
        assert!(envelope.headers.is_empty());
        assert_eq!(envelope.body_json().unwrap(), raw);
    }

    #[test]
    fn test_primitive_payloads() {
        assert_eq!(normalize(Payload::raw(42)).body, "42");
        assert_eq!(normalize(Payload::raw(true)).body, "true");
        assert_eq!(normalize(Payload::Raw(Value::Null)).body, "null");
        assert_eq!(normalize(Payload::raw(json!([1, "a"]))).body, r#"[1,"a"]"#);
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let envelope = normalize(
            Envelope::new()
                .body("aGVsbG8=")
                .base64_encoded(true)
                .extra("multiValueHeaders", json!({ "Set-Cookie": ["a=1", "b=2"] }))
                .into(),
        );

        assert_eq!(envelope.extra["isBase64Encoded"], true);
        assert_eq!(envelope.extra["multiValueHeaders"]["Set-Cookie"][1], "b=2");
    }

    #[test]
    fn test_extra_cannot_shadow_envelope_fields() {
        let envelope = normalize(
            Envelope::new()
                .status(201)
                .extra("statusCode", 500)
                .extra("body", "shadow")
                .into(),
        );

        assert_eq!(envelope.status_code, 201);
        assert_eq!(envelope.body, EMPTY_BODY);
        assert!(envelope.extra.is_empty());

        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire, json!({ "statusCode": 201, "headers": {}, "body": "{}" }));
    }

    #[test]
    fn test_body_round_trip() {
        let bodies = [
            json!({ "nested": { "list": [1, 2.5, null, "x"] }, "flag": false }),
            json!("unicode: \u{263a} \"quoted\""),
            json!([]),
            json!(-17),
        ];

        for body in bodies {
            let via_envelope = normalize(Envelope::new().body(body.clone()).into());
            assert_eq!(via_envelope.body_json().unwrap(), body);

            let via_raw = normalize(Payload::Raw(body.clone()));
            assert_eq!(via_raw.body_json().unwrap(), body);
        }
    }

    #[test]
    fn test_send_delivers_once_per_call() {
        let (responder, seen) = recording_responder();

        responder.send("first");
        responder.clone().send(());

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].as_ref().unwrap().body, "\"first\"");
        assert_eq!(seen[1].as_ref().unwrap().body, "{}");
    }

    #[test]
    fn test_fail_uses_error_slot() {
        let (responder, seen) = recording_responder();

        responder.fail(InvocationError::handler("boom"));

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], Err(InvocationError::handler("boom")));
    }
}
