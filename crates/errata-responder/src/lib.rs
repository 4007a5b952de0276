//! Exception classifier and responder
//!
//! Turns a classified [`errata_core::Exception`] into an API error response
//! with an application code, HTTP status, message, optional validation
//! payload and optional debug trace.
//!
//! Resolution runs in a fixed order:
//!
//! 1. code and status from the category, overlaid by configuration
//! 2. status recovered from the exception when it is not an error status
//! 3. the code reconciled against the category table to pick a template
//! 4. validation payload when the code is the validation code
//! 5. message from the exception, an `http_<status>` template or the
//!    category template
//! 6. debug trace when enabled

#![allow(clippy::must_use_candidate)]

mod envelope;
mod messages;
mod responder;

pub use envelope::{ApiErrorResponse, JsonResponseBuilder};
pub use messages::MessageCatalog;
pub use responder::Responder;
