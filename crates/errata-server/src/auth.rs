use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use errata_config::AuthConfig;
use errata_core::Exception;
use secrecy::ExposeSecret;

use crate::Raised;

/// Whether `path` is a public path or lies below one
fn is_public(path: &str, public_paths: &[String]) -> bool {
    public_paths.iter().any(|public| {
        let public = public.trim_end_matches('/');
        path == public || path.strip_prefix(public).is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Authenticate requests with a static bearer token
///
/// Requests under a public path skip the check. Anything else without a
/// known `Authorization: Bearer` token is raised as an authentication
/// exception and rendered as unauthorized.
pub async fn auth_middleware(config: Arc<AuthConfig>, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if is_public(path, &config.public_paths) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        tracing::debug!(path, "request without bearer token");
        return Raised(Exception::authentication().with_message("missing bearer token")).into_response();
    };

    if !config.tokens.iter().any(|known| known.expose_secret() == token) {
        tracing::warn!(path, "bearer token rejected");
        return Raised(Exception::authentication()).into_response();
    }

    next.run(request).await
}
