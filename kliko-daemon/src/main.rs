//! kliko: reads the municipal collection calendar and colors a Hue light after the
//! bin that is picked up today (or tomorrow).
//!
//! # Environment Variables
//!
//! - `KLIKO_CONFIG`: config file (default: `./kliko.toml` when present)
//! - `KLIKO_ADDRESS`, `KLIKO_BRIDGE`, `KLIKO_LIGHTS`, `KLIKO_RUN_AT`, `KLIKO_TARGET`,
//!   `KLIKO_BRIGHTNESS`, `KLIKO_CREDENTIALS`, `KLIKO_HTTP_TIMEOUT_SECS`,
//!   `KLIKO_CALENDAR_URL`: override the config file
//! - `RUST_LOG`: log filter (default: info)

mod cli;
mod config;
mod trigger;

use std::time::Duration as StdDuration;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use crate::cli::Arguments;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let arguments = Arguments::parse();
    let config = Config::load(arguments.config.as_deref())?;

    // HTTP client shared by the calendar and the bridge
    let client = Client::builder()
        .user_agent("kliko/0.1")
        .timeout(StdDuration::from_secs(config.http_timeout_secs))
        .build()?;

    cli::run(arguments.command.unwrap_or_default(), &config, client).await
}
