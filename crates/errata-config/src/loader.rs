use std::path::Path;

use anyhow::Context;
use errata_core::codes::{MAX_ERROR_STATUS, MIN_ERROR_STATUS};
use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Config::parse`] fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// Expands `{{ env.VAR }}` placeholders, then deserializes and validates
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable expansion, TOML parsing or
    /// validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).context("config variable expansion failed")?;

        let config: Self = toml::from_str(&expanded).context("failed to parse config")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_responder_config()?;
        self.validate_auth_config()?;
        Ok(())
    }

    /// Validate exception overrides, the debug key and message templates
    ///
    /// Statuses below the error range are accepted here: the responder
    /// recovers a usable status for them at render time.
    fn validate_responder_config(&self) -> anyhow::Result<()> {
        let responder = &self.responder;

        for (category, value) in responder.exception.iter() {
            let Some(http_code) = value.http_code else {
                continue;
            };

            if http_code > MAX_ERROR_STATUS {
                anyhow::bail!(
                    "responder.exception.{category}.http_code {http_code} is not an HTTP status (maximum {MAX_ERROR_STATUS})"
                );
            }

            if http_code < MIN_ERROR_STATUS {
                tracing::warn!(
                    %category,
                    http_code,
                    "http_code override is not an error status, a status will be recovered per request"
                );
            }
        }

        if responder.debug.key.trim().is_empty() {
            anyhow::bail!("responder.debug.key must not be empty");
        }

        for (id, template) in &responder.messages {
            if template.trim().is_empty() {
                anyhow::bail!("responder.messages.{id} must not be empty");
            }
        }

        Ok(())
    }

    /// Validate auth configuration when auth is enabled
    fn validate_auth_config(&self) -> anyhow::Result<()> {
        let Some(ref auth) = self.server.auth else {
            return Ok(());
        };

        if !auth.enabled {
            return Ok(());
        }

        if auth.tokens.is_empty() {
            anyhow::bail!("server.auth.tokens must not be empty when auth is enabled");
        }

        if auth.tokens.iter().any(|token| token.expose_secret().is_empty()) {
            anyhow::bail!("server.auth.tokens must not contain empty tokens");
        }

        Ok(())
    }
}
