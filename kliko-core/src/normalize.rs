//! Rewrites the Dutch date phrasing used by the calendar into the canonical
//! `"<weekday> <day> <month>"` shape understood by [`crate::parse`].
//!
//! The calendar prints most dates as `"di 3 jun"`, but switches to relative words
//! ("vandaag", "morgen") for the next two days and occasionally spells out month or
//! weekday names. Those tokens are replaced one by one; unknown tokens are kept as
//! they are so the parser can reject them.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

/// Dutch month abbreviations, January first.
pub(crate) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

/// Dutch weekday abbreviations, Monday first.
pub(crate) const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["ma", "di", "wo", "do", "vr", "za", "zo"];

const TODAY: &str = "vandaag";
const TOMORROW: &str = "morgen";

/// Spellings the calendar uses that are not canonical abbreviations.
const IRREGULAR_TOKENS: [(&str, &str); 19] = [
    ("januari", "jan"),
    ("februari", "feb"),
    ("maart", "mrt"),
    ("april", "apr"),
    ("juni", "jun"),
    ("juli", "jul"),
    ("augustus", "aug"),
    ("september", "sep"),
    ("sept", "sep"),
    ("oktober", "okt"),
    ("november", "nov"),
    ("december", "dec"),
    ("maandag", "ma"),
    ("dinsdag", "di"),
    ("woensdag", "wo"),
    ("donderdag", "do"),
    ("vrijdag", "vr"),
    ("zaterdag", "za"),
    ("zondag", "zo"),
];

/// Normalize a raw date string against the moment the extraction pass started.
///
/// `vandaag` and `morgen` become the canonical form of `current_moment` and the day
/// after; long month and weekday names become their abbreviations. Each token is
/// rewritten at most once and the result is lowercase.
#[must_use]
pub fn normalize(raw_date_text: &str, current_moment: NaiveDateTime) -> String {
    let today = current_moment.date();
    raw_date_text
        .split_whitespace()
        .map(|token| normalize_token(token, today))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a date the way the calendar prints it, e.g. `"di 03 jun"`.
#[must_use]
pub fn canonical_form(date: NaiveDate) -> String {
    let month = MONTH_ABBREVIATIONS
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!(
        "{} {:02} {month}",
        weekday_abbreviation(date.weekday()),
        date.day()
    )
}

fn normalize_token(token: &str, today: NaiveDate) -> String {
    let lowered = token.to_lowercase();
    let bare = lowered.trim_end_matches([',', '.', ':']);

    if bare == TODAY {
        return canonical_form(today);
    }
    if bare == TOMORROW {
        return today
            .checked_add_days(Days::new(1))
            .map_or_else(|| bare.to_owned(), canonical_form);
    }

    IRREGULAR_TOKENS
        .iter()
        .find(|(variant, _)| *variant == bare)
        .map_or_else(|| bare.to_owned(), |(_, canonical)| (*canonical).to_owned())
}

fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    WEEKDAY_ABBREVIATIONS
        .get(weekday.num_days_from_monday() as usize)
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn moment(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid test date")
            .and_time(NaiveTime::from_hms_opt(8, 0, 0).expect("valid test time"))
    }

    #[test]
    fn today_becomes_current_date() {
        // Monday 2 June 2025
        let now = moment(2025, 6, 2);
        assert_eq!(normalize("vandaag", now), "ma 02 jun");
        assert_eq!(normalize("Vandaag", now), "ma 02 jun");
    }

    #[test]
    fn tomorrow_becomes_next_date() {
        let now = moment(2025, 6, 2);
        assert_eq!(normalize("morgen", now), "di 03 jun");
        assert_eq!(normalize("MORGEN:", now), "di 03 jun");
    }

    #[test]
    fn tomorrow_crosses_month_and_year() {
        assert_eq!(normalize("morgen", moment(2024, 12, 31)), "wo 01 jan");
    }

    #[test]
    fn long_names_become_abbreviations() {
        let now = moment(2025, 6, 2);
        assert_eq!(normalize("woensdag 5 maart", now), "wo 5 mrt");
        assert_eq!(normalize("vr 12 sept.", now), "vr 12 sep");
        assert_eq!(normalize("do 10 juli", now), "do 10 jul");
    }

    #[test]
    fn canonical_and_unknown_tokens_pass_through() {
        let now = moment(2025, 6, 2);
        assert_eq!(normalize("di 3 jun", now), "di 3 jun");
        assert_eq!(normalize("  za   14  mei ", now), "za 14 mei");
        assert_eq!(normalize("teapot", now), "teapot");
        assert_eq!(normalize("", now), "");
    }

    #[test]
    fn substituted_tokens_are_not_rewritten_again() {
        // "jun" is canonical already; "juni" must not turn into "jun" twice or
        // pick up a suffix.
        let now = moment(2025, 6, 2);
        assert_eq!(normalize("juni jun", now), "jun jun");
    }

    #[test]
    fn canonical_form_pads_the_day() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 5).expect("valid test date");
        assert_eq!(canonical_form(date), "zo 05 okt");
    }
}
