//! # alpr Core
//!
//! Data types shared by every layer of the alpr router.
//!
//! - **Event model**: the inbound API Gateway proxy event ([`ProxyEvent`]) and
//!   the opaque platform context ([`InvocationContext`])
//! - **Request projection**: [`RequestView`], the read-only view handed to
//!   route handlers
//! - **Response model**: the handler-side [`Payload`] union and the
//!   normalized [`ResponseEnvelope`] delivered to the completion callback
//! - **Errors**: [`EventError`] and [`InvocationError`]
//!
//! Nothing in this crate decides which handler runs; that lives in
//! `alpr-framework`.

pub mod error;
pub mod event;
pub mod request;
pub mod response;

mod serde_ext;

pub use error::{EventError, EventResult, InvocationError};
pub use event::{InvocationContext, ProxyEvent};
pub use request::RequestView;
pub use response::{
    DEFAULT_STATUS_CODE, EMPTY_BODY, Envelope, Payload, RESERVED_ENVELOPE_FIELDS,
    ResponseEnvelope,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::{
        Envelope, InvocationContext, InvocationError, Payload, ProxyEvent, RequestView,
        ResponseEnvelope,
    };
}
