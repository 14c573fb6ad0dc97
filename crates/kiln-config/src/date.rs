//! The `htmlDateString` filter and the clock it reads.

use chrono::{DateTime, NaiveDate, Utc};

/// Format produced by [`html_date_string`].
pub const HTML_DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format an instant as its UTC calendar date (`YYYY-MM-DD`).
///
/// `None` stands for "now" as reported by `clock`. Time of day and offset are
/// dropped.
pub fn html_date_string(value: Option<DateTime<Utc>>, clock: &dyn Clock) -> String {
    value
        .unwrap_or_else(|| clock.now())
        .format(HTML_DATE_FORMAT)
        .to_string()
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// Offsets are converted to UTC; a bare date means midnight UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, HTML_DATE_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn truncates_time_of_day() {
        let clock = FixedClock(instant(2030, 6, 1, 0, 0, 0));

        assert_eq!(
            html_date_string(Some(instant(2024, 1, 1, 23, 59, 59)), &clock),
            "2024-01-01"
        );
        assert_eq!(
            html_date_string(Some(instant(2024, 1, 1, 0, 0, 0)), &clock),
            "2024-01-01"
        );
    }

    #[test]
    fn missing_value_uses_clock() {
        let clock = FixedClock(instant(2025, 3, 9, 17, 30, 0));

        assert_eq!(html_date_string(None, &clock), "2025-03-09");
    }

    #[test]
    fn missing_value_with_system_clock_is_today() {
        let before = Utc::now().format(HTML_DATE_FORMAT).to_string();
        let result = html_date_string(None, &SystemClock);
        let after = Utc::now().format(HTML_DATE_FORMAT).to_string();

        assert_eq!(result.len(), 10);
        assert!(result == before || result == after);
    }

    #[test]
    fn is_idempotent() {
        let clock = SystemClock;
        let at = instant(2019, 12, 31, 12, 0, 0);

        assert_eq!(
            html_date_string(Some(at), &clock),
            html_date_string(Some(at), &clock)
        );
    }

    #[test]
    fn parses_rfc3339_into_utc() {
        // 01:30 at +02:00 is still the previous day in UTC
        let parsed = parse_date("2024-03-10T01:30:00+02:00").unwrap();

        assert_eq!(parsed, instant(2024, 3, 9, 23, 30, 0));
        assert_eq!(html_date_string(Some(parsed), &SystemClock), "2024-03-09");
    }

    #[test]
    fn parses_bare_date() {
        assert_eq!(parse_date("2024-02-29"), Some(instant(2024, 2, 29, 0, 0, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date(""), None);
    }
}
