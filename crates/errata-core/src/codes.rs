//! Application codes and HTTP status bounds shared by every resolution

use http::StatusCode;

/// Application-level error code reported to API clients
pub type ApiCode = u32;

/// Code reported when a resolved code matches no known category
pub const NO_ERROR_MESSAGE: ApiCode = 1;

/// Template id used for [`NO_ERROR_MESSAGE`]
pub const NO_ERROR_MESSAGE_KEY: &str = "no_error_message";

/// Lowest status accepted as an error status
pub const MIN_ERROR_STATUS: u16 = 400;

/// Highest status accepted as an error status
pub const MAX_ERROR_STATUS: u16 = 599;

/// Fallback status for HTTP exceptions outside the dedicated categories
pub const GENERIC_ERROR_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// Fallback status for exceptions nothing else claimed
pub const UNCAUGHT_ERROR_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Fallback status for the unauthenticated entry point
pub const UNAUTHORIZED_STATUS: StatusCode = StatusCode::UNAUTHORIZED;

/// Key the debug trace is nested under unless configured otherwise
pub const DEFAULT_TRACE_KEY: &str = "trace";

/// Whether `status` is a usable HTTP error status
pub const fn is_error_status(status: u16) -> bool {
    status >= MIN_ERROR_STATUS && status <= MAX_ERROR_STATUS
}

/// Convert a raw number into an error status, if it is one
pub fn error_status(raw: impl TryInto<u16>) -> Option<StatusCode> {
    let raw = raw.try_into().ok()?;

    if !is_error_status(raw) {
        return None;
    }

    StatusCode::from_u16(raw).ok()
}
