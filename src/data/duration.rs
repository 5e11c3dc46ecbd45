use std::time::Duration;

use anyhow::{bail, Result};

use super::units::TimeUnit;

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ms", 1_000_000.0),
    ("min", 60_000_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
    ("d", 86_400_000_000_000.0),
];

/// Parse interval strings like "5s", "500ms", "2m", "1.5h"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Invalid duration: {}", s);
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Format a duration given in seconds for a table cell, e.g. "1h 02m", "45.3s"
///
/// The unit is picked after rounding, so 59.96s reads "1m 00s", not "60.0s".
pub fn format_seconds(seconds: f64) -> String {
    let tenths = (seconds * 10.0).round();
    if tenths < 600.0 {
        return format!("{:.1}s", tenths / 10.0);
    }

    let secs = seconds.round() as u64;
    if secs < 3_600 {
        return format!("{}m {:02}s", secs / 60, secs % 60);
    }

    let minutes = (seconds / 60.0).round() as u64;
    if minutes < 24 * 60 {
        return format!("{}h {:02}m", minutes / 60, minutes % 60);
    }

    let hours = (seconds / 3_600.0).round() as u64;
    format!("{}d {:02}h", hours / 24, hours % 24)
}

/// Format an already-scaled value with the unit's short suffix, e.g. "1.50h"
pub fn format_scaled(value: f64, unit: TimeUnit) -> String {
    format!("{:.2}{}", value, unit.short())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        let d = parse_duration("0.25s").unwrap();
        assert!((d.as_secs_f64() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_parse_milliseconds() {
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_parse_minutes_and_hours() {
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("2min").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(45.26), "45.3s");
        assert_eq!(format_seconds(125.0), "2m 05s");
        assert_eq!(format_seconds(3_720.0), "1h 02m");
        assert_eq!(format_seconds(90_000.0), "1d 01h");
    }

    #[test]
    fn test_format_seconds_rounds_into_next_unit() {
        assert_eq!(format_seconds(59.94), "59.9s");
        assert_eq!(format_seconds(59.96), "1m 00s");
        assert_eq!(format_seconds(3_599.4), "59m 59s");
        assert_eq!(format_seconds(3_599.6), "1h 00m");
        assert_eq!(format_seconds(86_399.9), "1d 00h");
    }

    #[test]
    fn test_format_scaled() {
        assert_eq!(format_scaled(1.5, TimeUnit::Hours), "1.50h");
        assert_eq!(format_scaled(3.0, TimeUnit::Minutes), "3.00min");
    }
}
