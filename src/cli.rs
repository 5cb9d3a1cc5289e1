//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Origin;

/// Caching HTTP reverse proxy.
#[derive(Parser, Debug, Default)]
#[command(name = "caching-proxy")]
#[command(version, about = "Caching HTTP reverse proxy", long_about = None)]
pub struct Cli {
    /// Port to run the proxy server on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Origin server URL
    #[arg(short, long)]
    pub origin: Option<Origin>,

    /// Cache TTL in seconds [default: 3600]
    #[arg(short, long)]
    pub ttl: Option<u64>,

    /// Clear the cache and exit
    #[arg(long)]
    pub clear_cache: bool,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}
