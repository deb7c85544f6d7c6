//! Runtime configuration: an optional TOML file, overridden by `KLIKO_*` variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use serde::Deserialize;

use kliko_core::{model::TargetDay, notify::SIGNAL_BRIGHTNESS};
use kliko_hue::DEFAULT_CREDENTIALS_FILE;

/// Config file read when `--config` is not given, if it exists.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "kliko.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Calendar address, `"<postcode>:<house number>"`.
    pub(crate) address: String,
    /// Overrides the calendar host.
    pub(crate) calendar_url: Option<String>,
    /// Hue bridge IP or host name.
    pub(crate) bridge: String,
    /// Names of the lights to color.
    pub(crate) lights: Vec<String>,
    /// Local time of the daily run.
    #[serde(deserialize_with = "hh_mm::deserialize")]
    pub(crate) run_at: NaiveTime,
    /// Which day the run signals.
    pub(crate) target: TargetDay,
    /// Light brightness of the signal, in percent.
    pub(crate) brightness: u8,
    /// Where the bridge username is stored.
    pub(crate) credentials: PathBuf,
    /// Timeout for every HTTP request.
    pub(crate) http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "1221CC:4".to_owned(),
            calendar_url: None,
            bridge: "192.168.50.11".to_owned(),
            lights: vec!["Glass cabinet light".to_owned()],
            run_at: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            target: TargetDay::Today,
            brightness: SIGNAL_BRIGHTNESS,
            credentials: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load the config file (explicit path, or `kliko.toml` when present) and apply
    /// the process environment on top.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.with_overrides(|key| env::var(key).ok())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Apply `KLIKO_*` overrides looked up through `lookup`.
    pub(crate) fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup("KLIKO_ADDRESS") {
            self.address = address;
        }
        if let Some(url) = lookup("KLIKO_CALENDAR_URL") {
            self.calendar_url = Some(url);
        }
        if let Some(bridge) = lookup("KLIKO_BRIDGE") {
            self.bridge = bridge;
        }
        if let Some(lights) = lookup("KLIKO_LIGHTS") {
            self.lights = lights
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(run_at) = lookup("KLIKO_RUN_AT") {
            self.run_at = hh_mm::parse(&run_at)
                .with_context(|| format!("KLIKO_RUN_AT must be HH:MM, got {run_at:?}"))?;
        }
        if let Some(target) = lookup("KLIKO_TARGET") {
            self.target = match target.trim().to_lowercase().as_str() {
                "today" => TargetDay::Today,
                "tomorrow" => TargetDay::Tomorrow,
                other => bail!("KLIKO_TARGET must be today or tomorrow, got {other:?}"),
            };
        }
        if let Some(brightness) = lookup("KLIKO_BRIGHTNESS") {
            self.brightness = brightness
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|percent| *percent <= 100)
                .with_context(|| format!("KLIKO_BRIGHTNESS must be 0-100, got {brightness:?}"))?;
        }
        if let Some(credentials) = lookup("KLIKO_CREDENTIALS") {
            self.credentials = PathBuf::from(credentials);
        }
        if let Some(timeout) = lookup("KLIKO_HTTP_TIMEOUT_SECS") {
            self.http_timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("KLIKO_HTTP_TIMEOUT_SECS must be seconds, got {timeout:?}"))?;
        }
        Ok(self)
    }
}

mod hh_mm {
    use chrono::{NaiveTime, ParseResult};
    use serde::{Deserialize, Deserializer, de::Error as _};

    pub(super) fn parse(value: &str) -> ParseResult<NaiveTime> {
        NaiveTime::parse_from_str(value.trim(), "%H:%M")
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(D::Error::custom)
    }
}
