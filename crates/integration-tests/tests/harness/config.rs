//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use errata_config::{AuthConfig, CategoryOverride, Config, HealthConfig, ServerConfig};
use errata_core::{ApiCode, Category};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Require one of the given bearer tokens outside the health path
    pub fn with_auth(mut self, tokens: &[&str]) -> Self {
        self.config.server.auth = Some(AuthConfig {
            enabled: true,
            tokens: tokens.iter().map(|t| SecretString::from(*t)).collect(),
            public_paths: vec!["/health".to_owned()],
        });
        self
    }

    /// Include debug traces under the given key
    pub fn with_debug(mut self, key: &str) -> Self {
        self.config.responder.debug.enabled = true;
        self.config.responder.debug.key = key.to_owned();
        self
    }

    /// Override the code and status of a category
    pub fn with_override(mut self, category: Category, code: Option<ApiCode>, http_code: Option<u16>) -> Self {
        self.config
            .responder
            .exception
            .set(category, CategoryOverride { code, http_code });
        self
    }

    /// Add or replace a message template
    pub fn with_message(mut self, id: &str, template: &str) -> Self {
        self.config
            .responder
            .messages
            .insert(id.to_owned(), template.to_owned());
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
