//! Command line surface and the wiring of the concrete collaborators.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use reqwest::Client;
use tokio::time::sleep;
use tracing::{info, warn};

use kliko_core::{
    model::ScheduleEntry,
    notify::ColorTable,
    ports::{PortError, SystemClock},
    service::KlikoService,
};
use kliko_hue::{HueBridge, HueCredentials};
use kliko_provider_gad::GadCalendar;

use crate::config::Config;
use crate::trigger::run_daily;

/// Attempts made while waiting for the link button.
const PAIR_ATTEMPTS: u32 = 15;
const PAIR_INTERVAL: StdDuration = StdDuration::from_secs(2);

#[derive(Debug, Parser)]
#[command(version, about = "Shows the next waste bin on a Hue light")]
pub(crate) struct Arguments {
    /// Path of the TOML config file (defaults to ./kliko.toml when present)
    #[arg(long, env = "KLIKO_CONFIG", global = true)]
    pub(crate) config: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Default, Subcommand)]
pub(crate) enum Command {
    /// Signal the bin every day at the configured time
    #[default]
    Daemon,
    /// Signal the bin once, right now
    Once,
    /// Print the upcoming collections
    Schedule,
    /// Pair with the Hue bridge; press its link button first
    Pair,
}

pub(crate) async fn run(command: Command, config: &Config, client: Client) -> Result<()> {
    match command {
        Command::Daemon => {
            let service = build_service(config, client);
            info!(run_at = %config.run_at, target = %config.target, "Starting kliko");
            run_daily(&service, config.run_at, config.target, &config.lights).await;
        }
        Command::Once => {
            let service = build_service(config, client);
            let outcome = service.run_once(config.target, &config.lights).await;
            info!(?outcome, "Run finished");
        }
        Command::Schedule => {
            let service = build_service(config, client);
            print_schedule(service.upcoming().await);
        }
        Command::Pair => pair(config, client).await?,
    }
    Ok(())
}

fn build_service(config: &Config, client: Client) -> KlikoService {
    let calendar = match &config.calendar_url {
        Some(url) => GadCalendar::with_base_url(client.clone(), url, &config.address),
        None => GadCalendar::new(client.clone(), &config.address),
    };

    let credentials = HueCredentials::load(&config.credentials).unwrap_or_else(|err| {
        warn!("Ignoring stored bridge credentials: {err}");
        None
    });
    if credentials.is_none() {
        warn!("Hue bridge is not paired yet; run `kliko pair`");
    }
    let bridge = HueBridge::new(client, &config.bridge, credentials);

    KlikoService::new(
        Arc::new(calendar),
        Arc::new(bridge),
        Arc::new(SystemClock),
        Arc::new(ColorTable::standard()),
    )
    .with_brightness(config.brightness)
}

#[expect(clippy::print_stdout, reason = "the schedule is the command's output")]
fn print_schedule(entries: Vec<ScheduleEntry>) {
    if entries.is_empty() {
        println!("No upcoming collections found");
    }
    for (date, category) in entries {
        println!("{} {category}", date.format("%a %d-%m-%Y"));
    }
}

async fn pair(config: &Config, client: Client) -> Result<()> {
    let mut bridge = HueBridge::new(client, &config.bridge, None);
    info!(bridge = %config.bridge, "Press the link button on the Hue bridge");

    for attempt in 1..=PAIR_ATTEMPTS {
        match bridge.pair("daemon").await {
            Ok(credentials) => {
                credentials.save(&config.credentials)?;
                info!(path = %config.credentials.display(), "Stored bridge credentials");
                return Ok(());
            }
            Err(PortError::NotPaired) => {
                info!(attempt, "Link button not pressed yet");
                sleep(PAIR_INTERVAL).await;
            }
            Err(err) => return Err(err.into()),
        }
    }
    bail!("link button was not pressed within {PAIR_ATTEMPTS} attempts")
}
