use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use errata_core::Exception;
use http::StatusCode;

/// Handler error carrying an [`Exception`] to the rendering middleware
///
/// The response produced here is a placeholder: the exception rides in the
/// response extensions and is replaced by the rendered error envelope on the
/// way out.
#[derive(Debug)]
pub struct Raised(pub Exception);

impl IntoResponse for Raised {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

impl From<Exception> for Raised {
    fn from(exception: Exception) -> Self {
        Self(exception)
    }
}

impl From<anyhow::Error> for Raised {
    #[track_caller]
    fn from(error: anyhow::Error) -> Self {
        Self(Exception::from(error))
    }
}

impl From<JsonRejection> for Raised {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        Self(Exception::http(rejection.status()).with_message(rejection.body_text()))
    }
}

/// JSON body extractor whose rejections are raised as HTTP exceptions
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Raised))]
pub struct ApiJson<T>(pub T);
