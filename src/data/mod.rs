//! Chart data models and processing.
//!
//! ## Submodules
//!
//! - [`units`]: Display time units, [`infer_time_unit`] and [`scale_time_units`]
//! - [`chart`]: Series construction from task-duration payloads ([`DurationChart`])
//! - [`duration`]: Parsing of interval strings and formatting of durations
//!
//! ## Data Flow
//!
//! ```text
//! TaskDurationData (raw JSON)
//!        │
//!        ▼
//! DurationChart::from_data()
//!        │
//!        ├──▶ group by task id × execution date, sum mapped instances
//!        │
//!        └──▶ infer_time_unit() / scale_time_units() for display
//! ```

pub mod chart;
pub mod duration;
pub mod units;

pub use chart::{ChartOption, DurationChart, Series, UnitChoice};
pub use units::{infer_time_unit, scale_time_units, scale_time_units_by_label, TimeUnit};
