use chrono::NaiveDateTime;

// std::time::Instant panics on wasm32, web-time is a drop-in replacement there.
#[cfg(not(target_arch = "wasm32"))]
pub type AppInstant = std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub type AppInstant = web_time::Instant;

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

/// Best-effort parse of a telemetry timestamp into epoch milliseconds.
///
/// Tracks devices write whatever their firmware likes, so we try the common
/// layouts plus RFC 3339 before giving up. Offsets are honoured when present,
/// naive stamps are taken as-is (interval math only needs them consistent).
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp_millis());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    // Bare epoch seconds show up in some exports
    if let Ok(secs) = trimmed.parse::<i64>() {
        if (0..=4_102_444_800).contains(&secs) {
            return Some(secs * 1000);
        }
    }

    None
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }
    let months = days / 30;
    if months < 12 {
        return format!("{}M", months);
    }
    let years = months / 12;
    let rem_months = months % 12;
    format!("{}Y {}M", years, rem_months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_formats() {
        assert_eq!(
            parse_timestamp_ms("2024-05-01 12:00:00"),
            Some(1_714_564_800_000)
        );
        assert_eq!(
            parse_timestamp_ms("2024-05-01T12:00:00"),
            Some(1_714_564_800_000)
        );
        assert_eq!(
            parse_timestamp_ms("2024-05-01T12:00:00+00:00"),
            Some(1_714_564_800_000)
        );
    }

    #[test]
    fn test_parse_epoch_seconds() {
        assert_eq!(parse_timestamp_ms("1714564800"), Some(1_714_564_800_000));
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_timestamp_ms("yesterday-ish"), None);
        assert_eq!(parse_timestamp_ms(""), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30_000), "30s");
        assert_eq!(format_duration(90_000), "1m");
        assert_eq!(format_duration(3 * 3600 * 1000), "3h");
        assert_eq!(format_duration(40 * 24 * 3600 * 1000), "1M");
    }
}
