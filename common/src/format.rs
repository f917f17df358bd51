//! Display formatting for backend timestamps.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// India Standard Time, UTC+05:30.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Renders a backend timestamp in IST as `05 Jan 2024, 03:04 pm`.
///
/// Timestamps without zone information are UTC. Empty input gives an empty
/// string; anything unparseable is returned unchanged.
pub fn format_timestamp_ist(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let Some(ist) = FixedOffset::east_opt(IST_OFFSET_SECS) else {
        return raw.to_string();
    };
    match parse_utc(raw) {
        Some(utc) => ist
            .from_utc_datetime(&utc.naive_utc())
            .format("%d %b %Y, %I:%M %P")
            .to_string(),
        None => raw.to_string(),
    }
}

fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(with_zone) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_zone.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Same as [`format_timestamp_ist`] for optional values.
pub fn format_optional_timestamp(raw: Option<&str>) -> String {
    raw.map(format_timestamp_ist).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamps_are_treated_as_utc() {
        assert_eq!(format_timestamp_ist("2024-01-05T09:34:00"), "05 Jan 2024, 03:04 pm");
        assert_eq!(format_timestamp_ist("2024-01-05 09:34:00.123456"), "05 Jan 2024, 03:04 pm");
    }

    #[test]
    fn zoned_timestamps_are_converted() {
        assert_eq!(format_timestamp_ist("2024-01-05T09:34:00Z"), "05 Jan 2024, 03:04 pm");
        assert_eq!(format_timestamp_ist("2024-01-05T23:00:00+00:00"), "06 Jan 2024, 04:30 am");
    }

    #[test]
    fn empty_and_garbage_inputs() {
        assert_eq!(format_timestamp_ist(""), "");
        assert_eq!(format_timestamp_ist("yesterday"), "yesterday");
        assert_eq!(format_optional_timestamp(None), "");
    }
}
