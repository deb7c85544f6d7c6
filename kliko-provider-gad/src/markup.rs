//! Extraction of raw entries from the `ul#ophaaldata` list on the address page.
//!
//! The page has used two layouts. The current one marks the date of every list item
//! with a `date` class; the older one only renders alternating date and label
//! lines.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use kliko_core::{
    extract::{extract as extract_schedule, pair_lines},
    model::{RawEntry, Schedule},
};

static LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul#ophaaldata").expect("static selector is valid"));
static DATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".date").expect("static selector is valid"));

/// Pull the `(label, date)` entries out of a calendar page.
///
/// Returns an empty vec when the page has no collection list.
#[must_use]
pub fn raw_entries(html: &str) -> Vec<RawEntry> {
    let document = Html::parse_document(html);
    let Some(list) = document.select(&LIST).next() else {
        debug!("Page has no collection list");
        return Vec::new();
    };

    let structured: Vec<RawEntry> = list
        .child_elements()
        .filter(|item| item.value().name() == "li")
        .filter_map(structured_entry)
        .collect();
    if !structured.is_empty() {
        return structured;
    }

    let text = list.text().collect::<String>();
    let lines: Vec<&str> = text.lines().collect();
    pair_lines(&lines)
}

/// Extract the schedule from a calendar page, see [`kliko_core::extract::extract`].
#[must_use]
pub fn extract(html: &str, current_moment: NaiveDateTime) -> Schedule {
    extract_schedule(raw_entries(html), current_moment)
}

fn structured_entry(item: ElementRef<'_>) -> Option<RawEntry> {
    let date = item.select(&DATE).next()?;
    let date_text = collapse_whitespace(&date.text().collect::<String>());
    // label: every text node outside the date element
    let label_parts: Vec<&str> = item
        .descendants()
        .filter(|node| !node.ancestors().any(|ancestor| ancestor.id() == date.id()))
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect();
    let label = collapse_whitespace(&label_parts.join(" "));
    Some(RawEntry::new(label, date_text))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
