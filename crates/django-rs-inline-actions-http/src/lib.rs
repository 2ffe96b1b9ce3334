//! # django-rs-inline-actions-http
//!
//! The HTTP surface that inline actions are dispatched through: an
//! [`HttpRequest`] carrying decoded GET/POST data and one-time messages, an
//! [`HttpResponse`] that converts into an Axum response, and the [`QueryDict`]
//! used for both query strings and form bodies.
//!
//! ## Modules
//!
//! - [`querydict`] - Ordered multi-value dictionary for form and query data
//! - [`request`] - Request type built from Axum request parts
//! - [`response`] - Response type and redirect helper
//! - [`messages`] - One-time notifications attached to a request

pub mod messages;
pub mod querydict;
pub mod request;
pub mod response;

pub use messages::{Message, MessageLevel, MessageStorage};
pub use querydict::QueryDict;
pub use request::{HttpRequest, HttpRequestBuilder};
pub use response::{HttpResponse, HttpResponseRedirect};
