use http::StatusCode;
use strum::IntoEnumIterator;

use crate::codes::ApiCode;

/// Fixed set of exception categories the responder resolves against
///
/// Declaration order is significant: it is the order in which
/// [`Category::reconcile`] walks the table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum Category {
    /// HTTP exception carrying status 404
    #[strum(serialize = "http_not_found")]
    NotFound,
    /// HTTP exception carrying status 503
    #[strum(serialize = "http_service_unavailable")]
    ServiceUnavailable,
    /// HTTP exception with any other status
    #[strum(serialize = "http_exception")]
    GenericHttpError,
    /// Anything that matched no other category
    #[strum(serialize = "uncaught_exception")]
    Uncaught,
    /// Authentication layer rejected the request
    #[strum(serialize = "authentication_exception")]
    AuthenticationFailure,
    /// Request data failed validation
    #[strum(serialize = "validation_exception")]
    ValidationFailure,
    /// HTTP exception carrying status 401, or the unauthenticated entry point
    #[strum(serialize = "unauthorized_exception")]
    Unauthorized,
}

impl Category {
    /// Stable key used for configuration namespacing and template ids
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Compiled-in application code
    pub const fn default_code(self) -> ApiCode {
        match self {
            Self::NotFound => 10,
            Self::ServiceUnavailable => 11,
            Self::GenericHttpError => 12,
            Self::Uncaught => 13,
            Self::AuthenticationFailure => 14,
            Self::ValidationFailure => 15,
            Self::Unauthorized => 16,
        }
    }

    /// Compiled-in HTTP status
    pub const fn default_status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::GenericHttpError | Self::ValidationFailure => StatusCode::BAD_REQUEST,
            Self::Uncaught => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AuthenticationFailure | Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    /// Find the first category whose effective code equals `code`
    ///
    /// `effective_code` supplies the code in force for each category, which
    /// lets configuration overrides take part in the match.
    pub fn reconcile(code: ApiCode, effective_code: impl Fn(Self) -> ApiCode) -> Option<Self> {
        Self::iter().find(|category| effective_code(*category) == code)
    }
}
