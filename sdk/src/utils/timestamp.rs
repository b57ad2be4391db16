use chrono::DateTime;

pub const LAST_ACTIVITY_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Format an RFC 3339 last-activity timestamp for display, keeping the clock
/// time of the offset it was reported in. Malformed input is returned
/// unchanged rather than failing the render.
pub fn format_last_activity(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => parsed.naive_local().format(LAST_ACTIVITY_FORMAT).to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_utc_timestamps() {
        assert_eq!(
            format_last_activity("2024-05-01T12:34:56.789Z"),
            "2024/05/01 12:34"
        );
    }

    #[test]
    fn keeps_the_reported_offset_clock_time() {
        assert_eq!(
            format_last_activity("2024-05-01T09:15:00+02:00"),
            "2024/05/01 09:15"
        );
    }

    #[test]
    fn passes_malformed_input_through() {
        assert_eq!(format_last_activity("never"), "never");
        assert_eq!(format_last_activity(""), "");
    }
}
