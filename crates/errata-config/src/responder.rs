use errata_core::codes::DEFAULT_TRACE_KEY;
use errata_core::{ApiCode, Category, ConfigProvider};
use indexmap::IndexMap;
use serde::Deserialize;

/// Exception rendering configuration, the `[responder]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponderConfig {
    /// Per-category code and status overrides
    #[serde(default)]
    pub exception: ExceptionOverrides,
    /// Debug trace inclusion
    #[serde(default)]
    pub debug: DebugConfig,
    /// Message templates added to or replacing the built-in catalog
    #[serde(default)]
    pub messages: IndexMap<String, String>,
}

/// Overrides keyed by category key
///
/// One field per category so a misspelled key fails to load.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExceptionOverrides {
    pub http_not_found: Option<CategoryOverride>,
    pub http_service_unavailable: Option<CategoryOverride>,
    pub http_exception: Option<CategoryOverride>,
    pub uncaught_exception: Option<CategoryOverride>,
    pub authentication_exception: Option<CategoryOverride>,
    pub validation_exception: Option<CategoryOverride>,
    pub unauthorized_exception: Option<CategoryOverride>,
}

impl ExceptionOverrides {
    pub const fn get(&self, category: Category) -> Option<&CategoryOverride> {
        match category {
            Category::NotFound => self.http_not_found.as_ref(),
            Category::ServiceUnavailable => self.http_service_unavailable.as_ref(),
            Category::GenericHttpError => self.http_exception.as_ref(),
            Category::Uncaught => self.uncaught_exception.as_ref(),
            Category::AuthenticationFailure => self.authentication_exception.as_ref(),
            Category::ValidationFailure => self.validation_exception.as_ref(),
            Category::Unauthorized => self.unauthorized_exception.as_ref(),
        }
    }

    /// Replace the override for a category
    pub fn set(&mut self, category: Category, value: CategoryOverride) {
        let slot = match category {
            Category::NotFound => &mut self.http_not_found,
            Category::ServiceUnavailable => &mut self.http_service_unavailable,
            Category::GenericHttpError => &mut self.http_exception,
            Category::Uncaught => &mut self.uncaught_exception,
            Category::AuthenticationFailure => &mut self.authentication_exception,
            Category::ValidationFailure => &mut self.validation_exception,
            Category::Unauthorized => &mut self.unauthorized_exception,
        };
        *slot = Some(value);
    }

    /// Iterate over the categories that carry an override
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryOverride)> {
        use strum::IntoEnumIterator;

        Category::iter().filter_map(|category| self.get(category).map(|value| (category, value)))
    }
}

/// Code and status override for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryOverride {
    /// Application code reported to clients
    pub code: Option<ApiCode>,
    /// HTTP status of the response
    pub http_code: Option<u16>,
}

/// Debug trace configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Include exception type, file and line in responses
    #[serde(default)]
    pub enabled: bool,
    /// Key the trace is nested under
    #[serde(default = "default_trace_key")]
    pub key: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            key: default_trace_key(),
        }
    }
}

fn default_trace_key() -> String {
    DEFAULT_TRACE_KEY.to_string()
}

impl ConfigProvider for ResponderConfig {
    fn code_override(&self, category: Category) -> Option<ApiCode> {
        self.exception.get(category).and_then(|value| value.code)
    }

    fn http_code_override(&self, category: Category) -> Option<u16> {
        self.exception.get(category).and_then(|value| value.http_code)
    }

    fn debug_trace_key(&self) -> Option<&str> {
        self.debug.enabled.then_some(self.debug.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_uses_defaults() {
        let config: ResponderConfig = toml::from_str("").unwrap();

        assert!(config.exception.iter().next().is_none());
        assert!(!config.debug.enabled);
        assert_eq!(config.debug.key, "trace");
        assert!(config.messages.is_empty());
        assert_eq!(config.debug_trace_key(), None);
    }

    #[test]
    fn deserialize_overrides() {
        let toml = r#"
            [exception.http_not_found]
            code = 100
            http_code = 410

            [exception.validation_exception]
            http_code = 422
        "#;

        let config: ResponderConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.code_override(Category::NotFound), Some(100));
        assert_eq!(config.http_code_override(Category::NotFound), Some(410));
        assert_eq!(config.code_override(Category::ValidationFailure), None);
        assert_eq!(config.http_code_override(Category::ValidationFailure), Some(422));
        assert_eq!(config.code_override(Category::Uncaught), None);

        let overridden: Vec<_> = config.exception.iter().map(|(category, _)| category).collect();
        assert_eq!(overridden, [Category::NotFound, Category::ValidationFailure]);
    }

    #[test]
    fn every_category_key_has_an_override_table() {
        use strum::IntoEnumIterator;

        for (code, category) in (100..).zip(Category::iter()) {
            let toml = format!("[exception.{}]\ncode = {code}\n", category.key());

            let config: ResponderConfig = toml::from_str(&toml).unwrap();

            assert_eq!(config.code_override(category), Some(code), "{category}");
            let overridden: Vec<_> = config.exception.iter().map(|(c, _)| c).collect();
            assert_eq!(overridden, [category]);
        }
    }

    #[test]
    fn misspelled_category_is_rejected() {
        let toml = r"
            [exception.http_not_fuond]
            code = 100
        ";

        let err = toml::from_str::<ResponderConfig>(toml).unwrap_err();
        assert!(err.to_string().contains("http_not_fuond"));
    }

    #[test]
    fn unknown_override_field_is_rejected() {
        let toml = r#"
            [exception.uncaught_exception]
            status = 500
        "#;

        assert!(toml::from_str::<ResponderConfig>(toml).is_err());
    }

    #[test]
    fn debug_key_only_exposed_when_enabled() {
        let toml = r#"
            [debug]
            enabled = true
            key = "origin"
        "#;

        let config: ResponderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.debug_trace_key(), Some("origin"));
    }

    #[test]
    fn set_replaces_override() {
        let mut overrides = ExceptionOverrides::default();
        overrides.set(
            Category::Unauthorized,
            CategoryOverride {
                code: Some(401),
                http_code: None,
            },
        );

        assert_eq!(overrides.get(Category::Unauthorized).and_then(|o| o.code), Some(401));
        assert!(overrides.get(Category::AuthenticationFailure).is_none());
    }

    #[test]
    fn messages_keep_declaration_order() {
        let toml = r#"
            [messages]
            http_404 = "Nothing here (error {api_code})"
            http_exception = "Request failed"
        "#;

        let config: ResponderConfig = toml::from_str(toml).unwrap();
        let ids: Vec<_> = config.messages.keys().map(String::as_str).collect();
        assert_eq!(ids, ["http_404", "http_exception"]);
    }
}
