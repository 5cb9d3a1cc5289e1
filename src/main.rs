//! Caching HTTP reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                 CACHING PROXY                     │
//!   Client Request    │  ┌──────────┐    ┌──────────┐    ┌────────────┐  │
//!   ──────────────────┼─▶│  http    │───▶│ handler  │───▶│   cache    │  │
//!                     │  │  server  │    │ key/hit? │◀───│   store    │  │
//!                     │  └──────────┘    └────┬─────┘    └────────────┘  │
//!                     │                       │ miss            ▲        │
//!                     │                       ▼                 │ set    │
//!   Client Response   │  ┌──────────┐    ┌──────────┐           │        │
//!   ◀─────────────────┼──│ response │◀───│ forward  │───────────┘        │
//!                     │  │ X-Cache  │    │  client  │◀───────────────────┼──── Origin
//!                     │  └──────────┘    └──────────┘                    │
//!                     │                                                  │
//!                     │  config · lifecycle · observability              │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use caching_proxy::cli::Cli;
use caching_proxy::config;
use caching_proxy::lifecycle;
use caching_proxy::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);

    if config.clear_cache {
        lifecycle::clear_cache(&config);
        println!("Cache cleared successfully");
        return ExitCode::SUCCESS;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "caching-proxy starting"
    );

    match lifecycle::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Proxy failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
