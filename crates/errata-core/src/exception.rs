use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::HttpError;

/// Field-level validation messages, keyed by field name in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Builder form of [`FieldErrors::add`]
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(field, messages)| (field.into(), messages)).collect())
    }
}

/// What the framework boundary knew about an error when it classified it
#[derive(Debug, Clone)]
pub enum ExceptionKind {
    /// Error that already carries an HTTP status
    Http {
        status: StatusCode,
        /// Headers to send along with the error response
        headers: HeaderMap,
    },
    /// Request data failed validation
    Validation { errors: FieldErrors },
    /// Authentication layer rejected the request
    Authentication,
    /// Anything else
    Other,
}

/// An error surfaced during request handling, classified at the boundary
///
/// Constructors capture the caller's source location, which is reported in
/// the debug trace when that is enabled.
#[derive(Debug, Clone)]
pub struct Exception {
    kind: ExceptionKind,
    class: Cow<'static, str>,
    message: String,
    code: i64,
    location: Option<&'static Location<'static>>,
}

impl Exception {
    /// Raise an HTTP error with the given status and no message
    #[track_caller]
    pub fn http(status: StatusCode) -> Self {
        Self::new(
            ExceptionKind::Http {
                status,
                headers: HeaderMap::new(),
            },
            "HttpException",
        )
    }

    /// Raise a validation failure for the given field errors
    #[track_caller]
    pub fn validation(errors: FieldErrors) -> Self {
        Self::new(ExceptionKind::Validation { errors }, "ValidationException")
    }

    /// Raise an authentication failure
    #[track_caller]
    pub fn authentication() -> Self {
        Self::new(ExceptionKind::Authentication, "AuthenticationException")
    }

    /// Raise an unclassified error with an explicit type name
    #[track_caller]
    pub fn other(class: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Other, class).with_message(message)
    }

    /// Wrap any error value as an unclassified exception
    ///
    /// The type name of `E` becomes the class, so `E` must be a concrete
    /// type. For a `dyn Error`, use [`Exception::other`] with a class name.
    #[track_caller]
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self::other(std::any::type_name::<E>(), error.to_string())
    }

    /// Wrap a domain error that knows its own HTTP status
    #[track_caller]
    pub fn from_http_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self::new(
            ExceptionKind::Http {
                status: error.status_code(),
                headers: HeaderMap::new(),
            },
            error.error_type().to_owned(),
        )
        .with_message(error.client_message())
    }

    #[track_caller]
    fn new(kind: ExceptionKind, class: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            class: class.into(),
            message: String::new(),
            code: 0,
            location: Some(Location::caller()),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the embedded numeric code
    #[must_use]
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Add a response header; ignored for non-HTTP exceptions
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        if let ExceptionKind::Http { headers, .. } = &mut self.kind {
            headers.insert(name, value);
        }
        self
    }

    pub const fn kind(&self) -> &ExceptionKind {
        &self.kind
    }

    /// Type name reported in templates and the debug trace
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> i64 {
        self.code
    }

    pub const fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    /// Status carried by an HTTP exception
    pub const fn http_status(&self) -> Option<StatusCode> {
        match &self.kind {
            ExceptionKind::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Headers carried by an HTTP exception
    pub fn headers(&self) -> Option<&HeaderMap> {
        match &self.kind {
            ExceptionKind::Http { headers, .. } if !headers.is_empty() => Some(headers),
            _ => None,
        }
    }

    /// Field errors carried by a validation failure
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match &self.kind {
            ExceptionKind::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.class)
        } else {
            write!(f, "{}: {}", self.class, self.message)
        }
    }
}

impl std::error::Error for Exception {}

impl From<anyhow::Error> for Exception {
    #[track_caller]
    fn from(error: anyhow::Error) -> Self {
        Self::other(std::any::type_name::<anyhow::Error>(), format!("{error:#}"))
    }
}
