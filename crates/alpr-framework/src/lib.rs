//! # alpr Framework
//!
//! First-match routing for a single Lambda proxy invocation.
//!
//! This layer provides:
//! - [`RouteMatcher`] and the standalone predicates [`method_matches`] and
//!   [`route_matches`]
//! - [`RouteRule`] plus verb shortcuts in [`rules`]
//! - [`Router`], which dispatches to at most one handler
//! - [`Responder`], which normalizes handler payloads before they reach the
//!   completion callback
//!
//! ```text
//! ┌──────────────┐  route(rule)  ┌──────────┐  first match  ┌──────────┐
//! │  RouteRule…  │──────────────▶│  Router  │──────────────▶│ Handler  │
//! └──────────────┘               └──────────┘               └────┬─────┘
//!                                                                │ send(payload)
//!                                 ┌──────────┐  normalize   ┌─────▼─────┐
//!                                 │ callback │◀─────────────│ Responder │
//!                                 └──────────┘              └───────────┘
//! ```

pub mod error;
pub mod handler;
pub mod matcher;
pub mod responder;
pub mod router;
pub mod rule;
pub mod rules;
pub mod testing;

pub use error::{ConfigurationError, ConfigurationResult};
pub use handler::Handler;
pub use matcher::{RouteMatcher, method_matches, route_matches};
pub use responder::{Callback, Responder, normalize};
pub use router::{DispatchState, Router, RouterBuilder};
pub use rule::RouteRule;

pub use alpr_core::{Envelope, Payload, RequestView, ResponseEnvelope};
