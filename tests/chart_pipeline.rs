//! End-to-end: payload file → source → chart → exported option document.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use task_duration::app::write_chart_option;
use task_duration::{AutoRefresh, DataSource, DurationChart, FileSource, TimeUnit, UnitChoice};

const PAYLOAD: &str = r#"{
    "task_instances": [
        {"task_id": "ingest", "execution_date": "2024-06-01T00:00:00Z", "duration": 5400, "state": "success"},
        {"task_id": "ingest", "execution_date": "2024-06-02T00:00:00Z", "duration": 9000, "state": "success"},
        {"task_id": "score", "execution_date": "2024-06-02T00:00:00Z", "duration": 1800, "state": "success", "map_index": 0},
        {"task_id": "score", "execution_date": "2024-06-02T00:00:00Z", "duration": 1800, "state": "success", "map_index": 1},
        {"task_id": "publish", "execution_date": "2024-06-02T00:00:00Z", "state": "queued"}
    ]
}"#;

fn payload_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", PAYLOAD).unwrap();
    file
}

#[test]
fn file_payload_becomes_hour_scaled_chart() {
    let file = payload_file();
    let mut source = FileSource::new(file.path());
    let data = source.poll().expect("payload should load");

    let chart = DurationChart::from_data(&data, UnitChoice::Auto);
    assert_eq!(chart.task_ids, vec!["ingest", "score", "publish"]);
    assert_eq!(chart.run_count(), 2);
    assert_eq!(chart.unit, TimeUnit::Hours);

    let scaled = chart.scaled();
    assert_eq!(scaled[0].1, vec![Some(1.5), Some(2.5)]);
    // Two mapped instances of 30 minutes each
    assert_eq!(scaled[1].1, vec![None, Some(1.0)]);
    // Queued, no duration yet
    assert_eq!(scaled[2].1, vec![None, None]);
}

#[test]
fn queued_instance_keeps_auto_refresh_running() {
    let file = payload_file();
    let mut source = FileSource::new(file.path());
    let data = source.poll().unwrap();

    let mut refresh = AutoRefresh::new(true, Duration::from_secs(5));
    refresh.on_data(&data);
    assert!(refresh.is_on());
}

#[test]
fn exported_option_matches_chart() {
    let file = payload_file();
    let mut source = FileSource::new(file.path());
    let data = source.poll().unwrap();
    let chart = DurationChart::from_data(&data, UnitChoice::Fixed(TimeUnit::Minutes));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("option.json");
    write_chart_option(&chart, &out).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["yAxis"]["name"], "Duration (minutes)");
    assert_eq!(json["xAxis"]["data"][1], "2024-06-02T00:00:00Z");
    assert_eq!(json["series"][0]["data"][0], 90.0);
    assert_eq!(json["series"][1]["data"][1], 60.0);
}
