//! Route rules.

use alpr_core::ProxyEvent;

use crate::matcher::{RouteMatcher, route_matches};

/// A method+path predicate paired with a handler.
///
/// Rules are declared fresh for each [`Router::route`](crate::Router::route)
/// call and consumed by it.
///
/// # Example
///
/// ```rust
/// use alpr_framework::{RequestView, Responder, RouteRule};
///
/// let rule = RouteRule::new(["GET", "HEAD"], "/health", |_req: RequestView, res: Responder| {
///     res.send("ok");
/// });
/// assert!(rule.method().accepts("HEAD"));
/// ```
pub struct RouteRule<H> {
    method: RouteMatcher,
    path: RouteMatcher,
    handler: H,
}

impl<H> RouteRule<H> {
    /// Creates a rule from a method matcher, a path matcher and a handler.
    pub fn new(method: impl Into<RouteMatcher>, path: impl Into<RouteMatcher>, handler: H) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            handler,
        }
    }

    /// Returns the method matcher.
    pub fn method(&self) -> &RouteMatcher {
        &self.method
    }

    /// Returns the path matcher.
    pub fn path(&self) -> &RouteMatcher {
        &self.path
    }

    /// Returns whether this rule accepts `event`.
    pub fn matches(&self, event: &ProxyEvent) -> bool {
        route_matches(&self.method, &self.path, event)
    }

    /// Consumes the rule, returning its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }
}

impl<H> std::fmt::Debug for RouteRule<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRule")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
