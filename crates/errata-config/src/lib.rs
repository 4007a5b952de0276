#![allow(clippy::must_use_candidate)]

pub mod auth;
mod env;
pub mod health;
mod loader;
pub mod logging;
pub mod responder;
pub mod server;

use serde::Deserialize;

pub use auth::*;
pub use health::*;
pub use logging::*;
pub use responder::*;
pub use server::*;

/// Top-level errata configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Exception rendering configuration
    #[serde(default)]
    pub responder: ResponderConfig,
}
