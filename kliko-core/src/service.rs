//! High-level run facade combining the calendar, the extractor and the light.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{error, info, warn};

use crate::extract::extract;
use crate::model::{BinCategory, Schedule, ScheduleEntry, TargetDay};
use crate::notify::{ColorTable, LightCommand, SIGNAL_BRIGHTNESS, select};
use crate::ports::{CalendarSource, Clock, LightPort, Readiness};

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a single run ended up doing.
pub enum RunOutcome {
    /// Nothing is collected on the target day.
    NoCollection,
    /// A collection is due but the bridge cannot take commands.
    DeviceNotReady(BinCategory),
    /// The signal was sent to `lights_updated` of the configured lights.
    Signalled {
        /// Bin collected on the target day.
        category: BinCategory,
        /// Number of lights that accepted the command.
        lights_updated: usize,
    },
}

/// Public entry point for one bin-day run.
pub struct KlikoService {
    calendar: Arc<dyn CalendarSource>,
    light: Arc<dyn LightPort>,
    clock: Arc<dyn Clock>,
    colors: Arc<ColorTable>,
    brightness: u8,
}

impl KlikoService {
    /// Create a new service bound to its collaborators.
    #[must_use]
    pub fn new(
        calendar: Arc<dyn CalendarSource>,
        light: Arc<dyn LightPort>,
        clock: Arc<dyn Clock>,
        colors: Arc<ColorTable>,
    ) -> Self {
        Self {
            calendar,
            light,
            clock,
            colors,
            brightness: SIGNAL_BRIGHTNESS,
        }
    }

    /// Signal at `percent` brightness instead of [`SIGNAL_BRIGHTNESS`].
    #[must_use]
    pub fn with_brightness(mut self, percent: u8) -> Self {
        self.brightness = percent;
        self
    }

    /// Retrieve and extract the schedule.
    ///
    /// A retrieval failure is logged and yields an empty schedule.
    pub async fn schedule(&self) -> Schedule {
        self.schedule_at(self.clock.now()).await
    }

    /// Collections from the clock's current day onward, in date order.
    pub async fn upcoming(&self) -> Vec<ScheduleEntry> {
        let now = self.clock.now();
        self.schedule_at(now).await.upcoming(now.date()).collect()
    }

    /// Signal the bin collected on `target` on every light in `lights`.
    ///
    /// Never fails: retrieval and device problems are logged and leave the lights
    /// untouched.
    pub async fn run_once(&self, target: TargetDay, lights: &[String]) -> RunOutcome {
        let now = self.clock.now();
        let schedule = self.schedule_at(now).await;
        let target_date = target.resolve(now.date());

        let Some(category) = select(&schedule, target_date) else {
            info!(%target_date, "No bins to be picked up {target}");
            return RunOutcome::NoCollection;
        };
        info!(%target_date, "{target} they are picking up the {category} bin");

        if self.light.readiness().await == Readiness::NotReady {
            warn!("Light bridge is not ready; run `kliko pair` and press the link button");
            return RunOutcome::DeviceNotReady(category);
        }

        let command =
            LightCommand::for_hue(self.colors.color_for(category)).with_brightness(self.brightness);
        let mut lights_updated = 0;
        for light in lights {
            match self.light.apply(light, &command).await {
                Ok(()) => lights_updated += 1,
                Err(err) => error!(light = %light, "Could not set light: {err}"),
            }
        }

        RunOutcome::Signalled {
            category,
            lights_updated,
        }
    }

    async fn schedule_at(&self, now: NaiveDateTime) -> Schedule {
        let entries = match self.calendar.fetch_entries().await {
            Ok(entries) => entries,
            Err(err) => {
                error!("Could not retrieve the collection calendar: {err}");
                Vec::new()
            }
        };

        let schedule = extract(entries, now);
        if schedule.is_empty() {
            warn!("Collection calendar contained no usable entries");
        } else {
            info!(entries = schedule.len(), "Extracted collection schedule");
        }
        schedule
    }
}
