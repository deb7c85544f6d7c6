//! Turns raw `(label, date)` pairs into a [`Schedule`].

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::classify::classify;
use crate::model::{RawEntry, Schedule};
use crate::normalize::normalize;
use crate::parse::parse;

/// Build a schedule from raw calendar entries.
///
/// `current_moment` is read once by the caller and used for every entry, so that
/// "vandaag"/"morgen" resolve consistently within a pass; its year is assumed for
/// all dates. Entries whose date does not parse are logged and skipped, entries
/// without a recognizable bin are skipped silently. Later entries overwrite
/// earlier ones for the same date.
pub fn extract<I>(entries: I, current_moment: NaiveDateTime) -> Schedule
where
    I: IntoIterator<Item = RawEntry>,
{
    let assumed_year = current_moment.year();
    let mut schedule = Schedule::new();

    for entry in entries {
        let normalized = normalize(&entry.date_text, current_moment);
        let date = match parse(&normalized, assumed_year) {
            Ok(date) => date,
            Err(err) => {
                debug!(label = %entry.label, "skipping entry: {err}");
                continue;
            }
        };

        let Some(category) = classify(&entry.label) else {
            continue;
        };

        if let Some(previous) = schedule.insert(date, category) {
            debug!(%date, %previous, %category, "collection date listed twice");
        }
    }

    schedule
}

/// Pair up the lines of the legacy list layout, where a date line is followed by
/// its label.
///
/// Blank lines are dropped first. Every line is paired with its successor; pairs
/// that start on a label line fail to parse as a date and are dropped by
/// [`extract`].
pub fn pair_lines<S: AsRef<str>>(lines: &[S]) -> Vec<RawEntry> {
    let lines: Vec<&str> = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .windows(2)
        .filter_map(|pair| match pair {
            [date_text, label] => Some(RawEntry::new(*label, *date_text)),
            _ => None,
        })
        .collect()
}
