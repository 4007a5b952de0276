use http::StatusCode;

/// Trait for domain errors that already know their HTTP status
///
/// Implemented by application error types. The boundary turns these into
/// HTTP exceptions via [`crate::Exception::from_http_error`], keeping domain
/// errors decoupled from axum and from the responder.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `not_found_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}
