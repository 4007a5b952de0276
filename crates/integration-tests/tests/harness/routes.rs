//! Routes raising each kind of failure

use axum::Router;
use axum::routing::{get, post};
use errata_core::{Exception, FieldErrors};
use errata_server::{ApiJson, Raised};
use http::{HeaderValue, StatusCode, header};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Item {
    pub name: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/items", get(|| async { "items" }).post(create_item))
        .route("/validate", post(validate))
        .route("/maintenance", get(maintenance))
        .route("/teapot", get(|| async { Raised(Exception::http(StatusCode::IM_A_TEAPOT)) }))
        .route("/fail", get(fail))
        .route("/boom", get(boom))
}

async fn create_item(ApiJson(item): ApiJson<Item>) -> (StatusCode, String) {
    (StatusCode::CREATED, item.name)
}

async fn validate() -> Raised {
    let errors = FieldErrors::new()
        .with("email", "required")
        .with("email", "must be an email address")
        .with("name", "too short");

    Raised(Exception::validation(errors))
}

async fn maintenance() -> Raised {
    Raised(
        Exception::http(StatusCode::SERVICE_UNAVAILABLE).with_header(header::RETRY_AFTER, HeaderValue::from_static("30")),
    )
}

async fn fail() -> Result<String, Raised> {
    Err(anyhow::anyhow!("disk full").into())
}

async fn boom() -> String {
    panic!("kaboom");
}
