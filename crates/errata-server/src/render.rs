use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use errata_core::Exception;
use errata_responder::Responder;
use http::{StatusCode, header};

use crate::Raised;

/// Replace responses carrying a raised [`Exception`] with the rendered error
///
/// Bare 405 responses from the router (no `Content-Type`) are raised as
/// HTTP exceptions too, keeping their `Allow` header. A 405 a handler builds
/// with its own body passes through.
pub async fn render_exceptions(State(responder): State<Arc<Responder>>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    if let Some(exception) = response.extensions_mut().remove::<Exception>() {
        return responder.render(&exception).into_response();
    }

    if response.status() == StatusCode::METHOD_NOT_ALLOWED && !response.headers().contains_key(header::CONTENT_TYPE) {
        let mut exception = Exception::http(StatusCode::METHOD_NOT_ALLOWED);
        if let Some(allow) = response.headers().get(header::ALLOW) {
            exception = exception.with_header(header::ALLOW, allow.clone());
        }
        return responder.render(&exception).into_response();
    }

    response
}

/// Fallback for requests that matched no route
pub async fn not_found() -> Raised {
    Raised(Exception::http(StatusCode::NOT_FOUND))
}
