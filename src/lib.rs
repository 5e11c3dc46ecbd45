//! # task-duration
//!
//! A terminal task-duration chart for workflow-orchestrator runs.
//!
//! Task-instance duration samples are grouped by task id and execution date,
//! durations of mapped sub-instances in the same run are summed, and the
//! result is shown as one line per task in a unit picked from the data.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (series) │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │ refresh policy                                      │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | ChannelSource                  │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: time units ([`infer_time_unit`], [`scale_time_units`]) and
//!   chart construction ([`DurationChart`])
//! - **[`source`]**: the [`DataSource`] trait, payload types and sources
//! - **[`refresh`]**: when to poll, and when to stop
//! - **[`app`]**, **[`ui`]**, **[`events`]**: the terminal front end
//! - **[`settings`]**: layered configuration
//!
//! ## Usage
//!
//! ```
//! use task_duration::{infer_time_unit, scale_time_units, TimeUnit};
//!
//! let durations = [45.0, 5400.0, 900.0];
//! let unit = infer_time_unit(&durations);
//! assert_eq!(unit, TimeUnit::Minutes);
//! assert_eq!(scale_time_units(&durations, unit), vec![0.75, 90.0, 15.0]);
//! ```
//!
//! ### Feeding data from another task
//!
//! ```
//! use task_duration::{ChannelSource, DataSource, TaskDurationData};
//!
//! let (tx, mut source) = ChannelSource::create("api");
//! tx.send(TaskDurationData::default()).unwrap();
//! assert!(source.poll().is_some());
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod refresh;
pub mod settings;
pub mod source;
pub mod ui;

pub use app::App;
pub use data::{
    infer_time_unit, scale_time_units, scale_time_units_by_label, ChartOption, DurationChart,
    TimeUnit, UnitChoice,
};
pub use error::LoadError;
pub use refresh::AutoRefresh;
pub use settings::Settings;
pub use source::{
    has_active_runs, ChannelSource, DataSource, FileSource, TaskDurationData, TaskInstance,
    TaskState,
};
