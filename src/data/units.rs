//! Display time units for duration samples.
//!
//! Durations arrive in seconds. [`infer_time_unit`] picks a unit from the
//! largest sample so axis values stay readable, and [`scale_time_units`]
//! rescales a series into that unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest sample (in seconds) still shown in seconds.
const SECONDS_LIMIT: f64 = 60.0 * 2.0;
/// Largest sample (in seconds) still shown in minutes.
const MINUTES_LIMIT: f64 = 60.0 * 60.0 * 2.0;
/// Largest sample (in seconds) still shown in hours.
const HOURS_LIMIT: f64 = 24.0 * 60.0 * 60.0;

/// Unit used to display durations on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// All units, smallest first.
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
    ];

    /// Number of seconds in one of this unit.
    pub const fn seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 60.0 * 60.0,
            TimeUnit::Days => 24.0 * 60.0 * 60.0,
        }
    }

    /// Lowercase label, as used on the wire and in the CLI.
    pub const fn label(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }

    /// Short suffix for axis ticks.
    pub const fn short(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }

    /// Convert a value in seconds into this unit.
    pub fn scale(self, seconds: f64) -> f64 {
        match self {
            TimeUnit::Seconds => seconds,
            unit => seconds / unit.seconds(),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a unit label is not one of the known units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time unit: {0:?} (expected seconds, minutes, hours or days)")]
pub struct UnitParseError(pub String);

impl FromStr for TimeUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.label() == label)
            .ok_or_else(|| UnitParseError(s.to_string()))
    }
}

/// Pick the display unit for a set of durations given in seconds.
///
/// The choice depends only on the largest value. An empty input falls back
/// to hours.
pub fn infer_time_unit(time_seconds: &[f64]) -> TimeUnit {
    let Some(max) = time_seconds.iter().copied().reduce(f64::max) else {
        return TimeUnit::Hours;
    };

    if max <= SECONDS_LIMIT {
        TimeUnit::Seconds
    } else if max <= MINUTES_LIMIT {
        TimeUnit::Minutes
    } else if max <= HOURS_LIMIT {
        TimeUnit::Hours
    } else {
        TimeUnit::Days
    }
}

/// Rescale durations given in seconds into `unit`.
///
/// The output always has the same length as the input.
pub fn scale_time_units(time_seconds: &[f64], unit: TimeUnit) -> Vec<f64> {
    time_seconds.iter().map(|&s| unit.scale(s)).collect()
}

/// Like [`scale_time_units`], but takes the unit as a label.
///
/// An unrecognized label leaves the values unchanged.
pub fn scale_time_units_by_label(time_seconds: &[f64], unit: &str) -> Vec<f64> {
    match unit.parse::<TimeUnit>() {
        Ok(unit) => scale_time_units(time_seconds, unit),
        Err(_) => time_seconds.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_empty_defaults_to_hours() {
        assert_eq!(infer_time_unit(&[]), TimeUnit::Hours);
    }

    #[test]
    fn test_infer_thresholds() {
        assert_eq!(infer_time_unit(&[119.0]), TimeUnit::Seconds);
        assert_eq!(infer_time_unit(&[120.0]), TimeUnit::Seconds);
        assert_eq!(infer_time_unit(&[121.0]), TimeUnit::Minutes);
        assert_eq!(infer_time_unit(&[7199.0]), TimeUnit::Minutes);
        assert_eq!(infer_time_unit(&[7201.0]), TimeUnit::Hours);
        assert_eq!(infer_time_unit(&[86399.0]), TimeUnit::Hours);
        assert_eq!(infer_time_unit(&[86401.0]), TimeUnit::Days);
    }

    #[test]
    fn test_infer_uses_largest_value() {
        assert_eq!(infer_time_unit(&[5.0, 9000.0, 30.0]), TimeUnit::Hours);
        assert_eq!(infer_time_unit(&[0.0, 0.0]), TimeUnit::Seconds);
    }

    #[test]
    fn test_scale_to_one_unit() {
        assert_eq!(scale_time_units(&[3600.0], TimeUnit::Hours), vec![1.0]);
        assert_eq!(scale_time_units(&[60.0], TimeUnit::Minutes), vec![1.0]);
        assert_eq!(scale_time_units(&[86400.0], TimeUnit::Days), vec![1.0]);
    }

    #[test]
    fn test_scale_seconds_is_identity() {
        let xs = [0.5, 12.0, 9999.25];
        assert_eq!(scale_time_units(&xs, TimeUnit::Seconds), xs.to_vec());
    }

    #[test]
    fn test_scale_preserves_length_and_input() {
        let xs = vec![1.0, 2.0, 3.0, 4.0];
        for unit in TimeUnit::ALL {
            assert_eq!(scale_time_units(&xs, unit).len(), xs.len());
        }
        assert!(scale_time_units(&[], TimeUnit::Days).is_empty());
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_scale_by_label() {
        assert_eq!(scale_time_units_by_label(&[7200.0], "hours"), vec![2.0]);
        assert_eq!(scale_time_units_by_label(&[7200.0], "fortnights"), vec![7200.0]);
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("Minutes".parse::<TimeUnit>(), Ok(TimeUnit::Minutes));
        assert_eq!(" days ".parse::<TimeUnit>(), Ok(TimeUnit::Days));
        assert!("weeks".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_serde_label() {
        let json = serde_json::to_string(&TimeUnit::Hours).unwrap();
        assert_eq!(json, "\"hours\"");
        let unit: TimeUnit = serde_json::from_str("\"seconds\"").unwrap();
        assert_eq!(unit, TimeUnit::Seconds);
    }
}
