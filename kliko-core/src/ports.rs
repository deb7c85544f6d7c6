//! Traits describing the collaborators of a run and shared error types.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use reqwest::Error as ReqwestError;

use crate::model::RawEntry;
use crate::notify::LightCommand;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the calendar or the light bridge.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The calendar could not be retrieved for another reason.
    #[error("Retrieval failed: {0}")]
    Retrieval(String),
    /// The configured address identifier is unusable.
    #[error("Invalid address id")]
    InvalidAddress,
    /// The bridge has not been paired yet (link button not pressed).
    #[error("Bridge not paired: press the link button and pair again")]
    NotPaired,
    /// The light exists but does not respond.
    #[error("Light {0:?} is not reachable")]
    DeviceUnreachable(String),
    /// No light with that name is known to the bridge.
    #[error("Light {0:?} not found")]
    DeviceNotFound(String),
    /// The bridge rejected a request.
    #[error("Device error: {0}")]
    Device(String),
    /// Stored bridge credentials could not be read or written.
    #[error("Credentials error: {0}")]
    Credentials(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Whether the light bridge can accept commands.
pub enum Readiness {
    /// Paired and reachable.
    Ready,
    /// Pairing is missing or the bridge does not answer.
    NotReady,
}

#[async_trait]
/// Source of raw calendar entries for the configured address.
pub trait CalendarSource: Send + Sync {
    /// Retrieve the calendar and split it into raw `(label, date)` entries.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the calendar cannot be retrieved.
    async fn fetch_entries(&self) -> Result<Vec<RawEntry>, PortError>;
}

#[async_trait]
/// Light bridge capable of showing a collection signal.
pub trait LightPort: Send + Sync {
    /// Check whether the bridge is paired and answering.
    async fn readiness(&self) -> Readiness;

    /// Apply `command` to the light called `light_name`.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::DeviceNotFound`] or [`PortError::DeviceUnreachable`] when
    /// the light cannot be addressed, or another [`PortError`] when the bridge
    /// request fails.
    async fn apply(&self, light_name: &str, command: &LightCommand) -> Result<(), PortError>;
}

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current wall-clock moment.
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
/// [`Clock`] reading the system's local time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
