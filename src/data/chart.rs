//! Task-duration chart construction.
//!
//! Groups task instances by task id and execution date into one line series
//! per task, summing the durations of mapped sub-instances that share a run.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::units::{infer_time_unit, scale_time_units, TimeUnit};
use crate::source::TaskDurationData;

/// How the display unit is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitChoice {
    /// Infer from the largest duration in the chart.
    #[default]
    Auto,
    /// Always display in the given unit.
    Fixed(TimeUnit),
}

impl UnitChoice {
    /// Cycle Auto → Seconds → Minutes → Hours → Days → Auto.
    pub fn next(self) -> Self {
        match self {
            UnitChoice::Auto => UnitChoice::Fixed(TimeUnit::Seconds),
            UnitChoice::Fixed(TimeUnit::Seconds) => UnitChoice::Fixed(TimeUnit::Minutes),
            UnitChoice::Fixed(TimeUnit::Minutes) => UnitChoice::Fixed(TimeUnit::Hours),
            UnitChoice::Fixed(TimeUnit::Hours) => UnitChoice::Fixed(TimeUnit::Days),
            UnitChoice::Fixed(TimeUnit::Days) => UnitChoice::Auto,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitChoice::Auto => "auto",
            UnitChoice::Fixed(unit) => unit.label(),
        }
    }
}

impl std::str::FromStr for UnitChoice {
    type Err = super::units::UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(UnitChoice::Auto)
        } else {
            s.parse().map(UnitChoice::Fixed)
        }
    }
}

/// Durations of one task across runs, in seconds.
///
/// `values[i]` belongs to the i-th execution date of the chart; `None` means
/// the task has no finished instance in that run.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// Values converted into `unit`, gaps preserved.
    pub fn scaled(&self, unit: TimeUnit) -> Vec<Option<f64>> {
        let present: Vec<f64> = self.values.iter().flatten().copied().collect();
        let mut scaled = scale_time_units(&present, unit).into_iter();
        self.values
            .iter()
            .map(|v| v.and_then(|_| scaled.next()))
            .collect()
    }
}

/// Chart data ready for display.
#[derive(Debug, Clone)]
pub struct DurationChart {
    /// Distinct task ids, in first-seen order.
    pub task_ids: Vec<String>,
    /// Distinct execution dates, oldest first.
    pub execution_dates: Vec<DateTime<Utc>>,
    /// One series per entry in `task_ids`.
    pub series: Vec<Series>,
    pub unit: TimeUnit,
    pub last_updated: Instant,
}

impl DurationChart {
    /// Build the chart from a payload.
    pub fn from_data(data: &TaskDurationData, unit_choice: UnitChoice) -> Self {
        let mut task_ids: Vec<String> = Vec::new();
        let mut task_index: HashMap<&str, usize> = HashMap::new();
        let mut execution_dates: Vec<DateTime<Utc>> = Vec::new();

        for ti in &data.task_instances {
            if !task_index.contains_key(ti.task_id.as_str()) {
                task_index.insert(&ti.task_id, task_ids.len());
                task_ids.push(ti.task_id.clone());
            }
            execution_dates.push(ti.execution_date);
        }
        execution_dates.sort();
        execution_dates.dedup();

        let date_index: HashMap<DateTime<Utc>, usize> =
            execution_dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut series: Vec<Series> = task_ids
            .iter()
            .map(|name| Series {
                name: name.clone(),
                values: vec![None; execution_dates.len()],
            })
            .collect();

        for ti in &data.task_instances {
            let Some(duration) = ti.duration else {
                continue;
            };
            let row = task_index[ti.task_id.as_str()];
            let col = date_index[&ti.execution_date];
            let slot = &mut series[row].values[col];
            // Mapped sub-instances of the same run add up
            *slot = Some(slot.unwrap_or(0.0) + duration);
        }

        let unit = match unit_choice {
            UnitChoice::Fixed(unit) => unit,
            UnitChoice::Auto => {
                let all: Vec<f64> =
                    series.iter().flat_map(|s| s.values.iter().flatten().copied()).collect();
                infer_time_unit(&all)
            }
        };

        Self {
            task_ids,
            execution_dates,
            series,
            unit,
            last_updated: Instant::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Number of runs on the x axis.
    pub fn run_count(&self) -> usize {
        self.execution_dates.len()
    }

    /// Series values in the chart's display unit.
    pub fn scaled(&self) -> Vec<(&str, Vec<Option<f64>>)> {
        self.series.iter().map(|s| (s.name.as_str(), s.scaled(self.unit))).collect()
    }

    /// Largest value in the display unit, or 0 for an empty chart.
    pub fn max_scaled(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .map(|&v| self.unit.scale(v))
            .fold(0.0, f64::max)
    }

    /// Build a line-chart option document for export.
    pub fn to_option(&self) -> ChartOption {
        let dates: Vec<String> = self
            .execution_dates
            .iter()
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
            .collect();

        ChartOption {
            legend: Legend {
                data: self.task_ids.clone(),
            },
            x_axis: Axis {
                axis_type: "category",
                name: None,
                data: Some(dates),
            },
            y_axis: Axis {
                axis_type: "value",
                name: Some(format!("Duration ({})", self.unit)),
                data: None,
            },
            series: self
                .series
                .iter()
                .map(|s| LineSeries {
                    name: s.name.clone(),
                    series_type: "line",
                    data: s.scaled(self.unit),
                })
                .collect(),
        }
    }
}

/// Chart option document, in the shape line-chart widgets accept.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOption {
    pub legend: Legend,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub data: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    #[serde(rename = "type")]
    pub axis_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub series_type: &'static str,
    pub data: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{TaskInstance, UNMAPPED};

    fn ti(task_id: &str, date: &str, duration: Option<f64>, map_index: i64) -> TaskInstance {
        TaskInstance {
            task_id: task_id.to_string(),
            execution_date: date.parse().unwrap(),
            duration,
            state: None,
            map_index,
        }
    }

    fn sample() -> TaskDurationData {
        TaskDurationData {
            task_instances: vec![
                ti("extract", "2024-05-02T00:00:00Z", Some(30.0), UNMAPPED),
                ti("load", "2024-05-02T00:00:00Z", Some(90.0), UNMAPPED),
                ti("extract", "2024-05-01T00:00:00Z", Some(20.0), UNMAPPED),
                ti("transform", "2024-05-01T00:00:00Z", Some(10.0), 0),
                ti("transform", "2024-05-01T00:00:00Z", Some(15.0), 1),
                ti("transform", "2024-05-01T00:00:00Z", None, 2),
            ],
        }
    }

    #[test]
    fn test_groups_by_task_and_date() {
        let chart = DurationChart::from_data(&sample(), UnitChoice::Auto);

        assert_eq!(chart.task_ids, vec!["extract", "load", "transform"]);
        assert_eq!(chart.run_count(), 2);
        assert!(chart.execution_dates[0] < chart.execution_dates[1]);

        assert_eq!(chart.series[0].values, vec![Some(20.0), Some(30.0)]);
        assert_eq!(chart.series[1].values, vec![None, Some(90.0)]);
    }

    #[test]
    fn test_mapped_instances_are_summed() {
        let chart = DurationChart::from_data(&sample(), UnitChoice::Auto);
        assert_eq!(chart.series[2].values, vec![Some(25.0), None]);
    }

    #[test]
    fn test_same_instant_different_offset_is_one_run() {
        let data = TaskDurationData {
            task_instances: vec![
                ti("a", "2024-05-01T00:00:00Z", Some(1.0), UNMAPPED),
                ti("b", "2024-05-01T02:00:00+02:00", Some(2.0), UNMAPPED),
            ],
        };
        let chart = DurationChart::from_data(&data, UnitChoice::Auto);
        assert_eq!(chart.run_count(), 1);
    }

    #[test]
    fn test_unit_inferred_from_present_values() {
        let chart = DurationChart::from_data(&sample(), UnitChoice::Auto);
        assert_eq!(chart.unit, TimeUnit::Seconds);

        let long = TaskDurationData {
            task_instances: vec![ti("a", "2024-05-01T00:00:00Z", Some(3.0 * 3600.0), UNMAPPED)],
        };
        let chart = DurationChart::from_data(&long, UnitChoice::Auto);
        assert_eq!(chart.unit, TimeUnit::Hours);
        assert_eq!(chart.scaled()[0].1, vec![Some(3.0)]);
        assert!((chart.max_scaled() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_chart_defaults_to_hours() {
        let chart = DurationChart::from_data(&TaskDurationData::default(), UnitChoice::Auto);
        assert!(chart.is_empty());
        assert_eq!(chart.unit, TimeUnit::Hours);
        assert_eq!(chart.max_scaled(), 0.0);
    }

    #[test]
    fn test_fixed_unit_scales_and_keeps_gaps() {
        let chart = DurationChart::from_data(&sample(), UnitChoice::Fixed(TimeUnit::Minutes));
        assert_eq!(chart.unit, TimeUnit::Minutes);
        assert_eq!(chart.series[1].scaled(chart.unit), vec![None, Some(1.5)]);
        // Raw values stay in seconds
        assert_eq!(chart.series[1].values, vec![None, Some(90.0)]);
    }

    #[test]
    fn test_option_document() {
        let chart = DurationChart::from_data(&sample(), UnitChoice::Fixed(TimeUnit::Minutes));
        let json = serde_json::to_value(chart.to_option()).unwrap();

        assert_eq!(json["legend"]["data"][2], "transform");
        assert_eq!(json["xAxis"]["type"], "category");
        assert_eq!(json["xAxis"]["data"][0], "2024-05-01T00:00:00Z");
        assert_eq!(json["yAxis"]["name"], "Duration (minutes)");
        assert!(json["yAxis"].get("data").is_none());
        assert_eq!(json["series"][1]["type"], "line");
        assert!(json["series"][1]["data"][0].is_null());
        assert_eq!(json["series"][1]["data"][1], 1.5);
    }

    #[test]
    fn test_unit_choice_cycle_and_parse() {
        let mut choice = UnitChoice::Auto;
        for _ in 0..5 {
            choice = choice.next();
        }
        assert_eq!(choice, UnitChoice::Auto);
        assert_eq!("AUTO".parse::<UnitChoice>(), Ok(UnitChoice::Auto));
        assert_eq!("days".parse::<UnitChoice>(), Ok(UnitChoice::Fixed(TimeUnit::Days)));
        assert!("weeks".parse::<UnitChoice>().is_err());
    }
}
