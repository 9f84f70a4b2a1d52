//! Binary crate for the weather gateway.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the GraphQL API, static pages and assets over HTTP
//! - Interactive configuration and one-off lookups from the terminal

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use weather_core::RunMode;

mod cli;
mod graphql;
mod pages;
mod server;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(RunMode::from_env());

    let cmd = cli::Cli::parse();
    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise development logs at debug level.
fn init_tracing(mode: RunMode) {
    let default = if mode.is_development() {
        "info,weather_core=debug,weather_gateway=debug,tower_http=debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}
