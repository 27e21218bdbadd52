use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepts RFC 3339, a naive ISO-8601 date-time (read as UTC), or a bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `Jan 4, 2026, 10:00 AM`. Input that does not parse is returned as is.
pub fn format_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(ts) => ts.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_and_naive_timestamps_alike() {
        assert_eq!(format_date("2026-01-04T10:00:00Z"), "Jan 4, 2026, 10:00 AM");
        assert_eq!(format_date("2026-01-04T10:00:00.123456"), "Jan 4, 2026, 10:00 AM");
        assert_eq!(format_date("2026-01-04T15:30:00+00:00"), "Jan 4, 2026, 03:30 PM");
    }

    #[test]
    fn bare_dates_are_midnight_utc() {
        let ts = parse_timestamp("2026-02-02").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_shown_verbatim() {
        assert_eq!(parse_timestamp("last tuesday"), None);
        assert_eq!(format_date("last tuesday"), "last tuesday");
        assert_eq!(format_date(""), "");
    }
}
