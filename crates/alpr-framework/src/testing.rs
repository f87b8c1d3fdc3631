//! Helpers for testing route handlers.
//!
//! [`CapturedResponses`] is a completion callback that records every
//! delivery instead of sending it anywhere:
//!
//! ```rust
//! use alpr_core::ProxyEvent;
//! use alpr_framework::testing::CapturedResponses;
//! use alpr_framework::{RequestView, Responder, Router, rules};
//!
//! let captured = CapturedResponses::new();
//! let mut router = Router::builder()
//!     .event(ProxyEvent { http_method: "GET".into(), resource: "/ping".into(), ..Default::default() })
//!     .shared_callback(captured.callback())
//!     .build()
//!     .unwrap();
//!
//! router.route(rules::get("/ping", |_req: RequestView, res: Responder| res.send("pong")));
//!
//! assert_eq!(captured.single().unwrap().body, "\"pong\"");
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use alpr_core::{InvocationError, ResponseEnvelope};

use crate::responder::Callback;

type Delivery = Result<ResponseEnvelope, InvocationError>;

/// Records deliveries made through its callback.
#[derive(Debug, Clone, Default)]
pub struct CapturedResponses {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl CapturedResponses {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a callback that appends to this recorder.
    pub fn callback(&self) -> Callback {
        let deliveries = Arc::clone(&self.deliveries);
        Arc::new(move |delivery: Delivery| deliveries.lock().push(delivery))
    }

    /// Returns the number of deliveries so far.
    pub fn len(&self) -> usize {
        self.deliveries.lock().len()
    }

    /// Returns whether nothing has been delivered.
    pub fn is_empty(&self) -> bool {
        self.deliveries.lock().is_empty()
    }

    /// Returns the only delivery, if there was exactly one and it succeeded.
    pub fn single(&self) -> Option<ResponseEnvelope> {
        match self.deliveries.lock().as_slice() {
            [Ok(envelope)] => Some(envelope.clone()),
            _ => None,
        }
    }

    /// Removes and returns every delivery so far.
    pub fn take(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock())
    }
}
