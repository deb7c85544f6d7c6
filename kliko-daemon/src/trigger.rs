//! Once-a-day trigger at a fixed local time.

use std::time::Duration as StdDuration;

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tokio::signal::ctrl_c;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use kliko_core::{model::TargetDay, service::KlikoService};

/// How often the wall clock is compared against the run time.
const POLL_INTERVAL: StdDuration = StdDuration::from_secs(60);

/// Next moment at `run_at`: later today if that is still ahead, otherwise tomorrow.
pub(crate) fn next_run(now: NaiveDateTime, run_at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(run_at);
    if today > now {
        return today;
    }
    now.date()
        .checked_add_days(Days::new(1))
        .map_or(today, |tomorrow| tomorrow.and_time(run_at))
}

/// Whether the run for `now`'s day is due and has not happened yet.
pub(crate) fn is_due(now: NaiveDateTime, run_at: NaiveTime, last_run: Option<NaiveDate>) -> bool {
    now.time() >= run_at && last_run != Some(now.date())
}

/// Run the service every day at `run_at` until the process is interrupted.
///
/// The wall clock is polled, so a run missed while the host was suspended happens on
/// wake-up, and a clock stepping back past `run_at` does not repeat the day's run.
pub(crate) async fn run_daily(
    service: &KlikoService,
    run_at: NaiveTime,
    target: TargetDay,
    lights: &[String],
) {
    let started = Local::now().naive_local();
    // starting after today's run time waits for tomorrow
    let mut last_run = (started.time() >= run_at).then_some(started.date());
    info!(next = %next_run(started, run_at), "Waiting for the next run");

    let mut ticker = interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = ctrl_c() => {
                info!("Interrupted, shutting down");
                return;
            }
        }

        let now = Local::now().naive_local();
        if !is_due(now, run_at, last_run) {
            continue;
        }
        last_run = Some(now.date());

        let outcome = service.run_once(target, lights).await;
        info!(?outcome, next = %next_run(now, run_at), "Run finished");
    }
}
