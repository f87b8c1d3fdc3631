//! Shortcuts for building single-verb [`RouteRule`]s.
//!
//! ```rust
//! use alpr_framework::{RequestView, Responder, rules};
//!
//! let rule = rules::get("/users", |_req: RequestView, res: Responder| res.send("[]"));
//! assert!(rule.method().accepts("GET"));
//! ```

use crate::matcher::RouteMatcher;
use crate::rule::RouteRule;

/// Verbs accepted by [`any`].
pub const ALL_METHODS: [&str; 7] = ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

fn verb<H>(method: &str, path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    RouteRule::new(method, path, handler)
}

/// A `GET` rule.
pub fn get<H>(path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    verb("GET", path, handler)
}

/// A `HEAD` rule.
pub fn head<H>(path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    verb("HEAD", path, handler)
}

/// A `POST` rule.
pub fn post<H>(path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    verb("POST", path, handler)
}

/// A `PUT` rule.
pub fn put<H>(path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    verb("PUT", path, handler)
}

/// A `PATCH` rule.
pub fn patch<H>(path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    verb("PATCH", path, handler)
}

/// A `DELETE` rule.
pub fn delete<H>(path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    verb("DELETE", path, handler)
}

/// An `OPTIONS` rule.
pub fn options<H>(path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    verb("OPTIONS", path, handler)
}

/// A rule accepting every verb in [`ALL_METHODS`].
pub fn any<H>(path: impl Into<RouteMatcher>, handler: H) -> RouteRule<H> {
    RouteRule::new(ALL_METHODS, path, handler)
}
