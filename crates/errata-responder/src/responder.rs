use errata_config::ResponderConfig;
use errata_core::codes::{
    GENERIC_ERROR_STATUS, NO_ERROR_MESSAGE_KEY, UNAUTHORIZED_STATUS, UNCAUGHT_ERROR_STATUS, error_status,
};
use errata_core::{
    ApiCode, Category, ConfigProvider, DebugBlock, DebugTrace, Exception, ExceptionKind, MessageLookup, Payload,
    ResponseBuilder,
};
use http::StatusCode;

use crate::{JsonResponseBuilder, MessageCatalog};

/// Translates exceptions into error responses
///
/// Holds no per-request state; one instance serves every request.
#[derive(Debug, Clone)]
pub struct Responder<C = ResponderConfig, M = MessageCatalog, B = JsonResponseBuilder> {
    config: C,
    messages: M,
    builder: B,
}

impl Responder {
    /// Responder over the configured overrides, the message catalog with
    /// configured templates layered on top, and the JSON envelope
    pub fn from_config(config: ResponderConfig) -> Self {
        let messages = MessageCatalog::with_overrides(&config.messages);
        Self::new(config, messages, JsonResponseBuilder)
    }
}

impl<C, M, B> Responder<C, M, B>
where
    C: ConfigProvider,
    M: MessageLookup,
    B: ResponseBuilder,
{
    pub const fn new(config: C, messages: M, builder: B) -> Self {
        Self {
            config,
            messages,
            builder,
        }
    }

    /// Render an exception that escaped request handling
    pub fn render(&self, exception: &Exception) -> B::Response {
        let (category, fallback_status) = match exception.kind() {
            ExceptionKind::Http { status, .. } => match *status {
                StatusCode::NOT_FOUND => (Category::NotFound, *status),
                StatusCode::SERVICE_UNAVAILABLE => (Category::ServiceUnavailable, *status),
                StatusCode::UNAUTHORIZED => return self.handle_unauthenticated(exception),
                _ => (Category::GenericHttpError, GENERIC_ERROR_STATUS),
            },
            ExceptionKind::Validation { .. } => (Category::ValidationFailure, GENERIC_ERROR_STATUS),
            ExceptionKind::Authentication => return self.handle_unauthenticated(exception),
            ExceptionKind::Other => (Category::Uncaught, UNCAUGHT_ERROR_STATUS),
        };

        self.resolve(exception, category, category.default_code(), fallback_status)
    }

    /// Render a rejection raised by the authentication layer
    ///
    /// Resolves as unauthorized, falling back to the authentication failure
    /// code and status; `unauthorized_exception` overrides take precedence.
    pub fn handle_unauthenticated(&self, exception: &Exception) -> B::Response {
        let authentication = Category::AuthenticationFailure;
        let fallback_status = self
            .config
            .http_code_override(authentication)
            .and_then(error_status)
            .unwrap_or(UNAUTHORIZED_STATUS);

        self.resolve(
            exception,
            Category::Unauthorized,
            self.effective_code(authentication),
            fallback_status,
        )
    }

    /// Resolve code, status, message, payload and debug trace for an
    /// already classified exception and build the response
    pub fn resolve(
        &self,
        exception: &Exception,
        category: Category,
        fallback_code: ApiCode,
        fallback_status: StatusCode,
    ) -> B::Response {
        let code = self.config.code_override(category).unwrap_or(fallback_code);
        let status = self.resolve_status(exception, category, fallback_status);
        let base = Category::reconcile(code, |candidate| self.effective_code(candidate));

        let payload = self.payload(exception, code);
        let message = self.message(exception, code, base);
        let debug = self.debug_block(exception);

        if category == Category::Uncaught {
            tracing::error!(
                %category,
                code,
                status = status.as_u16(),
                class = exception.class(),
                reason = exception.message(),
                "uncaught exception"
            );
        } else {
            tracing::debug!(%category, code, status = status.as_u16(), "resolved exception");
        }

        self.builder
            .build_error(code, message, payload, status, exception.headers().cloned(), debug)
    }

    /// Application code in force for a category after configuration
    pub fn effective_code(&self, category: Category) -> ApiCode {
        self.config
            .code_override(category)
            .unwrap_or_else(|| category.default_code())
    }

    /// Configured or fallback status, recovered from the exception when it
    /// is not an error status
    fn resolve_status(&self, exception: &Exception, category: Category, fallback: StatusCode) -> StatusCode {
        let configured = self
            .config
            .http_code_override(category)
            .unwrap_or_else(|| fallback.as_u16());

        error_status(configured)
            .or_else(|| match exception.http_status() {
                Some(status) => error_status(status.as_u16()),
                None => error_status(exception.code()),
            })
            .or_else(|| error_status(fallback.as_u16()))
            .unwrap_or_else(|| category.default_status())
    }

    /// Field errors, when the resolved code is the validation code
    fn payload(&self, exception: &Exception, code: ApiCode) -> Option<Payload> {
        if code != self.effective_code(Category::ValidationFailure) {
            return None;
        }

        if let Some(errors) = exception.field_errors() {
            return Some(Payload::Validation {
                messages: errors.clone(),
            });
        }

        tracing::warn!(
            code,
            class = exception.class(),
            "code matches the validation code but the exception carries no field errors"
        );

        None
    }

    fn message(&self, exception: &Exception, code: ApiCode, base: Option<Category>) -> String {
        if !exception.message().is_empty() {
            return exception.message().to_owned();
        }

        let api_code = code.to_string();

        if let Some(status) = exception.http_status()
            && let Some(message) = self
                .messages
                .message(&format!("http_{}", status.as_u16()), &[("api_code", api_code.as_str())])
        {
            return message;
        }

        let template_id = base.map_or(NO_ERROR_MESSAGE_KEY, Category::key);

        self.messages
            .message(template_id, &[("api_code", api_code.as_str()), ("class", exception.class())])
            .or_else(|| self.messages.message(NO_ERROR_MESSAGE_KEY, &[("api_code", api_code.as_str())]))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("Error #{api_code}"))
    }

    fn debug_block(&self, exception: &Exception) -> Option<DebugBlock> {
        let key = self.config.debug_trace_key()?;
        let location = exception.location();

        Some(DebugBlock {
            key: key.to_owned(),
            trace: DebugTrace {
                class: exception.class().to_owned(),
                file: location.map(|location| location.file().to_owned()),
                line: location.map(std::panic::Location::line),
            },
        })
    }
}
