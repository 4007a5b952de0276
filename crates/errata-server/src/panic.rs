use std::any::Any;

use axum::response::{IntoResponse, Response};
use errata_core::Exception;

use crate::Raised;

/// Turn a handler panic into an uncaught exception
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(payload.as_ref());
    tracing::error!(%message, "request handler panicked");

    Raised(Exception::other("panic", message)).into_response()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else {
        "request handler panicked".to_owned()
    }
}
