use axum::Json;
use axum::response::{IntoResponse, Response};
use errata_core::{ApiCode, DebugBlock, Payload, ResponseBuilder};
use http::{HeaderMap, StatusCode};
use serde::Serialize;

/// Finished error response
///
/// Serializes to the JSON body clients receive; status and headers travel
/// outside the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiErrorResponse {
    #[serde(skip)]
    status: StatusCode,
    #[serde(skip)]
    headers: HeaderMap,
    success: bool,
    code: ApiCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<DebugBlock>,
}

impl ApiErrorResponse {
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub const fn code(&self) -> ApiCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn data(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    pub const fn debug(&self) -> Option<&DebugBlock> {
        self.debug.as_ref()
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(mut self) -> Response {
        let status = self.status;
        let headers = std::mem::take(&mut self.headers);

        (status, headers, Json(self)).into_response()
    }
}

/// Builds [`ApiErrorResponse`] envelopes
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponseBuilder;

impl ResponseBuilder for JsonResponseBuilder {
    type Response = ApiErrorResponse;

    fn build_error(
        &self,
        code: ApiCode,
        message: String,
        payload: Option<Payload>,
        status: StatusCode,
        headers: Option<HeaderMap>,
        debug: Option<DebugBlock>,
    ) -> ApiErrorResponse {
        ApiErrorResponse {
            status,
            headers: headers.unwrap_or_default(),
            success: false,
            code,
            message,
            data: payload,
            debug,
        }
    }
}
