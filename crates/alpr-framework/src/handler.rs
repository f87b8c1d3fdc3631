//! Handler trait for route rules.
//!
//! Any `FnOnce(RequestView, Responder) -> R` is a handler, so closures and
//! plain functions work directly:
//!
//! ```rust
//! use alpr_framework::{RequestView, Responder};
//!
//! fn hello(_request: RequestView, response: Responder) {
//!     response.send("Hello World!");
//! }
//! ```
//!
//! Types that need more structure can implement [`Handler`] themselves.
//! The value a handler returns is handed back from
//! [`Router::route`](crate::Router::route); the response itself only ever
//! travels through the [`Responder`].

use alpr_core::RequestView;

use crate::responder::Responder;

/// A route handler, invoked at most once per router.
pub trait Handler {
    /// The value returned to the caller of `route`.
    type Output;

    /// Runs the handler.
    fn call(self, request: RequestView, responder: Responder) -> Self::Output;
}

impl<F, R> Handler for F
where
    F: FnOnce(RequestView, Responder) -> R,
{
    type Output = R;

    fn call(self, request: RequestView, responder: Responder) -> Self::Output {
        (self)(request, responder)
    }
}
