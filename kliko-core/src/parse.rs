//! Parser for the `"<weekday> <day> <month>"` dates printed by the calendar.

use chrono::NaiveDate;

use crate::normalize::{MONTH_ABBREVIATIONS, WEEKDAY_ABBREVIATIONS};

const ENGLISH_MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const ENGLISH_WEEKDAY_ABBREVIATIONS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors raised while parsing a normalized date.
pub enum ParseError {
    /// The text does not have the weekday/day/month shape or names no real date.
    #[error("Malformed date: {0:?}")]
    MalformedDate(String),
}

/// Parse a normalized date in the given year.
///
/// The weekday must be a known abbreviation but is not checked against the
/// resulting date. Year rollover is left to the caller.
///
/// # Errors
///
/// Returns [`ParseError::MalformedDate`] when the text does not consist of exactly
/// a weekday, a day number and a month abbreviation, or when the day does not exist
/// in that month.
pub fn parse(normalized_text: &str, assumed_year: i32) -> Result<NaiveDate, ParseError> {
    let malformed = || ParseError::MalformedDate(normalized_text.to_owned());

    let mut fields = normalized_text.split_whitespace();
    let (Some(weekday), Some(day), Some(month), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    if !is_weekday(weekday) {
        return Err(malformed());
    }
    let day = parse_day(day).ok_or_else(malformed)?;
    let month = month_number(month).ok_or_else(malformed)?;

    NaiveDate::from_ymd_opt(assumed_year, month, day).ok_or_else(malformed)
}

fn is_weekday(field: &str) -> bool {
    let field = field.to_lowercase();
    WEEKDAY_ABBREVIATIONS
        .iter()
        .chain(ENGLISH_WEEKDAY_ABBREVIATIONS.iter())
        .any(|abbreviation| *abbreviation == field)
}

fn parse_day(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn month_number(field: &str) -> Option<u32> {
    let field = field.to_lowercase();
    let position = MONTH_ABBREVIATIONS
        .iter()
        .position(|abbreviation| *abbreviation == field)
        .or_else(|| {
            ENGLISH_MONTH_ABBREVIATIONS
                .iter()
                .position(|abbreviation| *abbreviation == field)
        })?;
    u32::try_from(position).ok().map(|index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn parses_english_abbreviations() {
        assert_eq!(parse("wed 14 jul", 2024), Ok(date(2024, 7, 14)));
    }

    #[test]
    fn parses_dutch_abbreviations() {
        assert_eq!(parse("di 03 jun", 2025), Ok(date(2025, 6, 3)));
        assert_eq!(parse("wo 5 mrt", 2025), Ok(date(2025, 3, 5)));
        assert_eq!(parse("Za 31 Okt", 2026), Ok(date(2026, 10, 31)));
        assert_eq!(parse("vr 9 mei", 2025), Ok(date(2025, 5, 9)));
    }

    #[test]
    fn rejects_text_that_is_not_a_date() {
        assert_eq!(
            parse("teapot", 2024),
            Err(ParseError::MalformedDate("teapot".to_owned()))
        );
        assert!(parse("", 2024).is_err());
        assert!(parse("ophalen van restafval", 2024).is_err());
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(parse("di 3", 2025).is_err());
        assert!(parse("di 3 jun 2025", 2025).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(parse("xx 3 jun", 2025).is_err());
        assert!(parse("di 3 juni", 2025).is_err());
        assert!(parse("di drie jun", 2025).is_err());
        assert!(parse("di 123 jun", 2025).is_err());
        assert!(parse("di +3 jun", 2025).is_err());
    }

    #[test]
    fn rejects_days_missing_from_the_month() {
        assert!(parse("ma 31 feb", 2025).is_err());
        assert!(parse("za 29 feb", 2025).is_err());
        assert_eq!(parse("do 29 feb", 2024), Ok(date(2024, 2, 29)));
        assert!(parse("ma 0 jan", 2025).is_err());
    }
}
