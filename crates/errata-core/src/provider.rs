//! Collaborators the responder consumes
//!
//! Each one is injected, so resolution never reads global state.

use http::{HeaderMap, StatusCode};

use crate::{ApiCode, Category, DebugBlock, Payload};

/// Read-only access to the exception override configuration
pub trait ConfigProvider: Send + Sync {
    /// Configured application code for a category, if overridden
    fn code_override(&self, category: Category) -> Option<ApiCode>;

    /// Configured HTTP status for a category, if overridden
    ///
    /// Returned verbatim; the responder checks that it is an error status.
    fn http_code_override(&self, category: Category) -> Option<u16>;

    /// Key to nest the debug trace under, or `None` when debug trace is off
    fn debug_trace_key(&self) -> Option<&str>;
}

/// Localized message templates
pub trait MessageLookup: Send + Sync {
    /// Render the template `id` with the given `{name}` substitutions
    ///
    /// Returns `None` when no template with that id exists.
    fn message(&self, id: &str, substitutions: &[(&str, &str)]) -> Option<String>;
}

/// Builds the final error envelope
pub trait ResponseBuilder: Send + Sync {
    type Response;

    fn build_error(
        &self,
        code: ApiCode,
        message: String,
        payload: Option<Payload>,
        status: StatusCode,
        headers: Option<HeaderMap>,
        debug: Option<DebugBlock>,
    ) -> Self::Response;
}
