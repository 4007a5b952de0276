//! In-memory contacts API
//!
//! Small enough to read in one sitting; each route exercises a different
//! path through the error boundary.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use errata_core::{Exception, FieldErrors, HttpError};
use errata_server::{ApiJson, Raised};
use http::{HeaderValue, StatusCode, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct NewContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl NewContact {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "required");
        }

        if self.email.trim().is_empty() {
            errors.add("email", "required");
        } else if !self.email.contains('@') {
            errors.add("email", "must be an email address");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("contact {0} not found")]
    NotFound(String),
}

impl HttpError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::NotFound(_) => "ContactNotFound",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl From<ContactError> for Raised {
    #[track_caller]
    fn from(error: ContactError) -> Self {
        Self(Exception::from_http_error(&error))
    }
}

#[derive(Debug, Default)]
struct ContactStore {
    contacts: RwLock<BTreeMap<u64, Contact>>,
}

type SharedStore = Arc<ContactStore>;

/// Contacts routes under `/v1`
pub fn router() -> Router {
    Router::new()
        .route("/v1/contacts", get(list_contacts).post(create_contact))
        .route("/v1/contacts/{id}", get(get_contact))
        .route("/v1/maintenance", get(maintenance))
        .with_state(SharedStore::default())
}

async fn list_contacts(State(store): State<SharedStore>) -> Json<Vec<Contact>> {
    let contacts = store.contacts.read().await;
    Json(contacts.values().cloned().collect())
}

async fn create_contact(
    State(store): State<SharedStore>,
    ApiJson(input): ApiJson<NewContact>,
) -> Result<(StatusCode, Json<Contact>), Raised> {
    if let Err(errors) = input.validate() {
        return Err(Exception::validation(errors).into());
    }

    let mut contacts = store.contacts.write().await;
    let id = contacts.last_key_value().map_or(1, |(id, _)| id + 1);

    let contact = Contact {
        id,
        name: input.name.trim().to_owned(),
        email: input.email.trim().to_owned(),
    };
    contacts.insert(id, contact.clone());

    tracing::debug!(id, "contact created");

    Ok((StatusCode::CREATED, Json(contact)))
}

async fn get_contact(State(store): State<SharedStore>, Path(id): Path<String>) -> Result<Json<Contact>, Raised> {
    let contacts = store.contacts.read().await;

    let contact = id
        .parse::<u64>()
        .ok()
        .and_then(|key| contacts.get(&key))
        .ok_or(ContactError::NotFound(id))?;

    Ok(Json(contact.clone()))
}

async fn maintenance() -> Raised {
    Raised(
        Exception::http(StatusCode::SERVICE_UNAVAILABLE).with_header(header::RETRY_AFTER, HeaderValue::from_static("120")),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use errata_config::Config;
    use errata_server::Server;
    use http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app() -> Router {
        Server::new(Config::default(), router()).unwrap().into_router()
    }

    fn post(body: &Value) -> Request<Body> {
        Request::post("/v1/contacts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn validation_collects_every_field() {
        let input = NewContact {
            name: " ".to_owned(),
            email: "not-an-address".to_owned(),
        };

        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some(&["required".to_owned()][..]));
        assert_eq!(errors.get("email"), Some(&["must be an email address".to_owned()][..]));
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let app = app();

        let (status, created) = send(app.clone(), post(&json!({"name": "Ada", "email": "ada@example.com"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);

        let (status, fetched) = send(app, Request::get("/v1/contacts/1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn invalid_contact_is_a_validation_failure() {
        let (status, body) = send(app(), post(&json!({"name": "Ada"}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 15);
        assert_eq!(body["data"]["messages"]["email"], json!(["required"]));
    }

    #[tokio::test]
    async fn unknown_contact_uses_domain_message() {
        let (status, body) = send(app(), Request::get("/v1/contacts/42").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 10);
        assert_eq!(body["message"], "contact 42 not found");
    }
}
