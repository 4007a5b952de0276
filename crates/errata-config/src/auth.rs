use secrecy::SecretString;
use serde::Deserialize;

/// Bearer token authentication configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Whether bearer token auth is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Accepted bearer tokens
    #[serde(default)]
    pub tokens: Vec<SecretString>,

    /// Paths that skip authentication
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

fn default_public_paths() -> Vec<String> {
    vec!["/health".to_string()]
}
