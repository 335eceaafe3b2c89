use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Parses an authored date, either a plain `YYYY-MM-DD` date or a full
/// datetime. Datetimes with an offset are normalized to UTC.
///
/// Returns `None` for anything that doesn't parse.
pub fn parse_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();

    if date.contains('T') {
        DateTime::parse_from_rfc3339(date)
            .map(|datetime| datetime.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    } else {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

/// An authored date as it falls in a given timezone.
enum LocalDate {
    Date(NaiveDate),
    DateTime(DateTime<Tz>),
}

/// Plain dates are taken as-is; datetimes are shifted into `timezone`, with
/// offset-less datetimes read as UTC.
fn parse_in(date: &str, timezone: Tz) -> Option<LocalDate> {
    let date = date.trim();

    if date.contains('T') {
        let datetime = match DateTime::parse_from_rfc3339(date) {
            Ok(datetime) => datetime.with_timezone(&timezone),
            Err(_) => NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
                .ok()?
                .and_utc()
                .with_timezone(&timezone),
        };

        Some(LocalDate::DateTime(datetime))
    } else {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(LocalDate::Date)
    }
}

/// The calendar day an authored date falls on in `timezone`.
pub fn local_date(date: &str, timezone: Tz) -> Option<NaiveDate> {
    match parse_in(date, timezone)? {
        LocalDate::Date(date) => Some(date),
        LocalDate::DateTime(datetime) => Some(datetime.date_naive()),
    }
}

/// Formats an authored date with the given `strftime` format.
///
/// Returns `None` when the date doesn't parse or the format is invalid.
pub fn format_date(date: &str, format: &str, timezone: Tz) -> Option<String> {
    let mut formatted = String::new();

    let result = match parse_in(date, timezone)? {
        LocalDate::Date(date) => write!(formatted, "{}", date.format(format)),
        LocalDate::DateTime(datetime) => write!(formatted, "{}", datetime.format(format)),
    };

    result.ok().map(|_| formatted)
}

/// Whether `format` is a `strftime` format chrono understands.
pub fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Returns the current calendar date in the given timezone.
pub fn today_in(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-12-05"),
            NaiveDate::from_ymd_opt(2024, 12, 5).and_then(|date| date.and_hms_opt(0, 0, 0))
        );
        assert_eq!(
            parse_date("2024-12-05T10:30:00+03:00"),
            NaiveDate::from_ymd_opt(2024, 12, 5).and_then(|date| date.and_hms_opt(7, 30, 0))
        );
        assert_eq!(
            parse_date("2024-12-05T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 12, 5).and_then(|date| date.and_hms_opt(10, 30, 0))
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date("2025-03-20", "%B %-d, %Y", Tz::UTC),
            Some("March 20, 2025".to_string())
        );
        assert_eq!(
            format_date(
                "2025-03-20T22:00:00Z",
                "%Y-%m-%d %H:%M",
                chrono_tz::Africa::Dar_es_Salaam
            ),
            Some("2025-03-21 01:00".to_string())
        );
        assert_eq!(format_date("soon", "%Y", Tz::UTC), None);
    }

    #[test]
    fn test_format_date_with_invalid_format() {
        assert_eq!(format_date("2025-03-20", "%Q %Y", Tz::UTC), None);
        assert_eq!(format_date("2025-03-20T10:00:00Z", "%Q", Tz::UTC), None);

        assert!(!is_valid_date_format("%Q %Y"));
        assert!(is_valid_date_format("%B %-d, %Y"));
    }

    #[test]
    fn test_local_date() {
        let dar_es_salaam = chrono_tz::Africa::Dar_es_Salaam;

        assert_eq!(
            local_date("2025-03-20T01:00:00+03:00", dar_es_salaam),
            NaiveDate::from_ymd_opt(2025, 3, 20)
        );
        assert_eq!(
            local_date("2025-03-20T01:00:00+03:00", Tz::UTC),
            NaiveDate::from_ymd_opt(2025, 3, 19)
        );
        assert_eq!(
            local_date("2025-03-20", Tz::UTC),
            NaiveDate::from_ymd_opt(2025, 3, 20)
        );
        assert_eq!(local_date("to be announced", Tz::UTC), None);
    }
}
