use std::collections::HashMap;
use std::sync::LazyLock;

use errata_core::codes::NO_ERROR_MESSAGE_KEY;
use errata_core::{Category, MessageLookup};
use regex::{Captures, Regex};
use strum::IntoEnumIterator;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern must be valid"));

/// Message templates by id
///
/// Starts from the built-in English templates; configuration adds
/// `http_<status>` templates or replaces built-in ones.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Catalog holding only the built-in templates
    pub fn builtin() -> Self {
        let mut templates: HashMap<String, String> = Category::iter()
            .map(|category| (category.key().to_owned(), builtin_template(category).to_owned()))
            .collect();
        templates.insert(NO_ERROR_MESSAGE_KEY.to_owned(), "Error #{api_code}".to_owned());

        Self { templates }
    }

    /// Built-in templates with configured ones layered on top
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut catalog = Self::builtin();
        for (id, template) in overrides {
            catalog.insert(id.clone(), template.clone());
        }
        catalog
    }

    pub fn insert(&mut self, id: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(id.into(), template.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MessageLookup for MessageCatalog {
    fn message(&self, id: &str, substitutions: &[(&str, &str)]) -> Option<String> {
        self.templates.get(id).map(|template| render(template, substitutions))
    }
}

const fn builtin_template(category: Category) -> &'static str {
    match category {
        Category::NotFound => "Unknown method or resource (error {api_code})",
        Category::ServiceUnavailable => "Service is temporarily unavailable (error {api_code})",
        Category::GenericHttpError => "HTTP exception {class} (error {api_code})",
        Category::Uncaught => "Uncaught exception {class} (error {api_code})",
        Category::AuthenticationFailure => "Authentication failed (error {api_code})",
        Category::ValidationFailure => "Invalid data (error {api_code})",
        Category::Unauthorized => "Unauthorized (error {api_code})",
    }
}

/// Substitute `{name}` placeholders in one pass; unknown names stay as-is
fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |captures: &Captures<'_>| {
            let name = &captures[1];
            substitutions
                .iter()
                .find(|(key, _)| *key == name)
                .map_or_else(|| captures[0].to_owned(), |(_, value)| (*value).to_owned())
        })
        .into_owned()
}
