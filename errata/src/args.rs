use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Errata demo API
#[derive(Debug, Parser)]
#[command(name = "errata", about = "Contacts API rendering every failure as a JSON error envelope")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "errata.toml", env = "ERRATA_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ERRATA_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the configured log filter (e.g. `errata_responder=debug,info`)
    #[arg(long, env = "ERRATA_LOG_FILTER")]
    pub log_filter: Option<String>,
}
