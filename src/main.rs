//! CLI entry point for the workbook-dl tool.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use workbook_dl::ClientConfig;

mod app;
mod cli;

use cli::Args;

/// Environment variable overriding the platform base URL.
const BASE_URL_ENV: &str = "WORKBOOK_DL_BASE_URL";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = client_config(&args);
    let exit = app::run(args.command, &config, args.quiet).await?;
    Ok(exit.into())
}

fn client_config(args: &Args) -> ClientConfig {
    let mut config =
        ClientConfig::default().with_timeouts(args.connect_timeout, args.read_timeout);
    if let Some(base_url) = args.base_url.clone().or_else(base_url_from_env) {
        config = config.with_base_url(base_url);
    }
    config
}

fn base_url_from_env() -> Option<String> {
    std::env::var(BASE_URL_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
