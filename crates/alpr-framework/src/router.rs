//! Single-shot, first-match router.
//!
//! A [`Router`] is bound to one event, one context and one completion
//! callback. The caller offers rules one at a time, in declaration order,
//! through [`Router::route`]:
//!
//! 1. If a previous rule already dispatched, the call is a no-op
//! 2. If the rule's method and path matchers both accept the event, the
//!    router becomes [`DispatchState::Dispatched`] and the handler runs
//! 3. Otherwise the call returns `None` and the next rule may match
//!
//! At most one handler runs per router, however many rules match.
//!
//! # Example
//!
//! ```rust
//! use alpr_core::{Envelope, ProxyEvent};
//! use alpr_framework::{RequestView, Responder, Router, rules};
//! use serde_json::json;
//!
//! let event = ProxyEvent::from_value(json!({ "httpMethod": "GET", "resource": "/users" })).unwrap();
//!
//! let mut router = Router::builder()
//!     .event(event)
//!     .callback(|result| println!("{result:?}"))
//!     .build()
//!     .unwrap();
//!
//! router.route(rules::post("/users", |_req: RequestView, res: Responder| {
//!     res.send(Envelope::new().status(201));
//! }));
//! router.route(rules::get("/users", |_req: RequestView, res: Responder| {
//!     res.send(json!([]));
//! }));
//!
//! assert!(router.is_dispatched());
//! ```

use std::sync::Arc;

use tracing::{debug, trace};

use alpr_core::{InvocationContext, InvocationError, ProxyEvent, RequestView, ResponseEnvelope};

use crate::error::{ConfigurationError, ConfigurationResult};
use crate::handler::Handler;
use crate::responder::{Callback, Responder};
use crate::rule::RouteRule;

/// Whether a router may still dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchState {
    /// No rule has matched yet.
    #[default]
    Pending,
    /// A handler was invoked; later rules are ignored.
    Dispatched,
}

/// Routes one invocation to at most one handler.
///
/// `route` takes `&mut self`, so one router cannot be routed from two
/// threads at once.
pub struct Router {
    event: Arc<ProxyEvent>,
    context: Arc<InvocationContext>,
    callback: Callback,
    state: DispatchState,
}

impl Router {
    /// Creates a router from its three parts.
    pub fn new<F>(event: ProxyEvent, context: InvocationContext, callback: F) -> Self
    where
        F: Fn(Result<ResponseEnvelope, InvocationError>) + Send + Sync + 'static,
    {
        Self::from_parts(event, context, Arc::new(callback))
    }

    /// Creates a router builder.
    ///
    /// Event and context are optional and default to empty values; the
    /// callback is required.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    fn from_parts(event: ProxyEvent, context: InvocationContext, callback: Callback) -> Self {
        Self {
            event: Arc::new(event),
            context: Arc::new(context),
            callback,
            state: DispatchState::Pending,
        }
    }

    /// Offers `rule` to the router.
    ///
    /// Returns `Some` with the handler's return value when this rule
    /// dispatched, and `None` when the rule did not match or an earlier
    /// rule already dispatched.
    pub fn route<H: Handler>(&mut self, rule: RouteRule<H>) -> Option<H::Output> {
        if self.state == DispatchState::Dispatched {
            trace!(
                method = ?rule.method(),
                path = ?rule.path(),
                "Router already dispatched, ignoring rule"
            );
            return None;
        }

        if !rule.matches(&self.event) {
            trace!(
                method = ?rule.method(),
                path = ?rule.path(),
                "Rule did not match, skipping"
            );
            return None;
        }

        self.state = DispatchState::Dispatched;
        debug!(
            method = %self.event.method(),
            resource = %self.event.resource_path(),
            "Rule matched, dispatching handler"
        );

        let request = RequestView::new(Arc::clone(&self.event), Arc::clone(&self.context));
        let responder = Responder::new(Arc::clone(&self.callback));
        Some(rule.into_handler().call(request, responder))
    }

    /// Returns whether `rule` would match this router's event.
    ///
    /// Ignores dispatch state and has no side effects.
    pub fn matches<H>(&self, rule: &RouteRule<H>) -> bool {
        rule.matches(&self.event)
    }

    /// Returns the current dispatch state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Returns whether a handler has been dispatched.
    pub fn is_dispatched(&self) -> bool {
        self.state == DispatchState::Dispatched
    }

    /// Returns the event being routed.
    pub fn event(&self) -> &ProxyEvent {
        &self.event
    }

    /// Returns the invocation context.
    pub fn context(&self) -> &InvocationContext {
        &self.context
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("method", &self.event.method())
            .field("resource", &self.event.resource_path())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
    event: Option<ProxyEvent>,
    context: Option<InvocationContext>,
    callback: Option<Callback>,
}

impl RouterBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event to route.
    pub fn event(mut self, event: ProxyEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// Sets the invocation context.
    pub fn context(mut self, context: InvocationContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the completion callback.
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(Result<ResponseEnvelope, InvocationError>) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Sets an already shared completion callback.
    pub fn shared_callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Builds the router.
    ///
    /// Fails with [`ConfigurationError::MissingCallback`] when no callback
    /// was set.
    pub fn build(self) -> ConfigurationResult<Router> {
        let callback = self.callback.ok_or(ConfigurationError::MissingCallback)?;
        Ok(Router::from_parts(
            self.event.unwrap_or_default(),
            self.context.unwrap_or_default(),
            callback,
        ))
    }
}

impl std::fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("event", &self.event)
            .field("context", &self.context)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
