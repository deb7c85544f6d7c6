//! Domain data structures for bin categories, raw entries, and schedules.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Household waste fractions collected by the municipality.
pub enum BinCategory {
    /// Plastic packaging.
    Plastic,
    /// Paper and cardboard.
    Paper,
    /// Garden, fruit and vegetable waste.
    Plants,
    /// Residual/grey bin.
    Residual,
}

impl BinCategory {
    /// Every category, in the fixed order used for classification.
    pub const ALL: [BinCategory; 4] = [
        BinCategory::Plastic,
        BinCategory::Paper,
        BinCategory::Plants,
        BinCategory::Residual,
    ];

    /// Lowercase Dutch keyword identifying the category in calendar labels.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            BinCategory::Plastic => "plastic",
            BinCategory::Paper => "papier",
            BinCategory::Plants => "groenten",
            BinCategory::Residual => "restafval",
        }
    }
}

impl fmt::Display for BinCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinCategory::Plastic => "plastic",
            BinCategory::Paper => "paper",
            BinCategory::Plants => "plants",
            BinCategory::Residual => "residual",
        };
        write!(formatter, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Position on the Hue color wheel (0..=65535).
pub struct Hue(pub u16);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Label and date text pulled out of the calendar markup, before any parsing.
pub struct RawEntry {
    /// Free-text description, e.g. "Ophalen van restafval".
    pub label: String,
    /// Date as printed by the source, e.g. "di 3 jun" or "morgen".
    pub date_text: String,
}

impl RawEntry {
    /// Construct a new raw entry.
    #[must_use]
    pub fn new<L: Into<String>, D: Into<String>>(label: L, date_text: D) -> Self {
        Self {
            label: label.into(),
            date_text: date_text.into(),
        }
    }
}

/// A single collection day.
pub type ScheduleEntry = (NaiveDate, BinCategory);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Collection dates mapped to the bin picked up on that day.
///
/// A date maps to at most one category; inserting an existing date replaces it.
pub struct Schedule {
    entries: BTreeMap<NaiveDate, BinCategory>,
}

impl Schedule {
    /// Create an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collection, returning the category previously stored for that date.
    pub fn insert(&mut self, date: NaiveDate, category: BinCategory) -> Option<BinCategory> {
        self.entries.insert(date, category)
    }

    /// Category collected on `date`, if any.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<BinCategory> {
        self.entries.get(&date).copied()
    }

    /// Number of collection days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no collection was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = ScheduleEntry> + '_ {
        self.entries.iter().map(|(date, category)| (*date, *category))
    }

    /// Entries on or after `from`, in date order.
    pub fn upcoming(&self, from: NaiveDate) -> impl Iterator<Item = ScheduleEntry> + '_ {
        self.entries
            .range(from..)
            .map(|(date, category)| (*date, *category))
    }
}

impl FromIterator<ScheduleEntry> for Schedule {
    fn from_iter<T: IntoIterator<Item = ScheduleEntry>>(iter: T) -> Self {
        let mut schedule = Schedule::new();
        for (date, category) in iter {
            schedule.insert(date, category);
        }
        schedule
    }
}

impl IntoIterator for Schedule {
    type Item = ScheduleEntry;
    type IntoIter = btree_map::IntoIter<NaiveDate, BinCategory>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which day a run signals: the collection day itself or the evening before.
pub enum TargetDay {
    /// Signal the bin collected today.
    #[default]
    Today,
    /// Signal the bin collected tomorrow.
    Tomorrow,
}

impl TargetDay {
    /// Resolve to a concrete date relative to `today`.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            TargetDay::Today => today,
            TargetDay::Tomorrow => today.checked_add_days(Days::new(1)).unwrap_or(today),
        }
    }
}

impl fmt::Display for TargetDay {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            TargetDay::Today => "today",
            TargetDay::Tomorrow => "tomorrow",
        };
        write!(formatter, "{slug}")
    }
}
