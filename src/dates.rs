use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a feed date into UTC.
///
/// Accepts RFC 3339, a bare `YYYY-MM-DD` date (midnight UTC), and naive ISO-8601
/// date-times (assumed UTC). Anything else is `None`; callers treat that the same
/// as a missing date.
pub fn parse_action_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Card date, e.g. `Mar 1, 2024`; `N/A` when missing or unparseable
pub fn format_card_date(raw: Option<&str>) -> String {
    raw.and_then(parse_action_date)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Header timestamp, e.g. `January 05, 2025 at 02:30 PM`
pub fn format_last_updated(dt: &DateTime<Utc>) -> String {
    dt.format("%B %d, %Y at %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_dates_at_midnight() {
        let dt = parse_action_date("2024-03-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_action_date("2024-03-01T10:00:00-05:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T15:00:00+00:00");
    }

    #[test]
    fn parses_python_isoformat_timestamps() {
        assert!(parse_action_date("2025-01-05T14:30:12.123456").is_some());
        assert!(parse_action_date("2025-01-05T14:30:12").is_some());
        assert!(parse_action_date("2025-01-05 14:30:12").is_some());
    }

    #[test]
    fn rejects_garbage_without_panicking() {
        for raw in ["", "   ", "soon", "2024-13-45", "03/01/2024", "0000-00-00"] {
            assert_eq!(parse_action_date(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn card_date_has_fallback() {
        assert_eq!(format_card_date(Some("2024-03-01")), "Mar 1, 2024");
        assert_eq!(format_card_date(Some("not a date")), "N/A");
        assert_eq!(format_card_date(None), "N/A");
    }

    #[test]
    fn last_updated_uses_long_form() {
        let dt = parse_action_date("2025-01-05T14:30:00Z").unwrap();
        assert_eq!(format_last_updated(&dt), "January 05, 2025 at 02:30 PM");
    }
}
