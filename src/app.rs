//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use tracing::{debug, warn};

use crate::data::{DurationChart, UnitChoice};
use crate::refresh::AutoRefresh;
use crate::source::{DataSource, TaskDurationData};
use crate::ui::Theme;

/// How long a status message stays on screen.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Line chart, one line per task.
    Chart,
    /// Task × run table of formatted durations.
    Table,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Chart => View::Table,
            View::Table => View::Chart,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Chart => "Chart",
            View::Table => "Table",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    source: Box<dyn DataSource>,
    /// Last payload received, kept so the chart survives failed loads.
    pub data: Option<TaskDurationData>,
    pub chart: Option<DurationChart>,
    pub load_error: Option<String>,
    pub refresh: AutoRefresh,
    pub unit_choice: UnitChoice,

    pub selected_task_index: usize,

    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(source: Box<dyn DataSource>, refresh: AutoRefresh, unit_choice: UnitChoice) -> Self {
        Self {
            running: true,
            current_view: View::Chart,
            show_help: false,
            source,
            data: None,
            chart: None,
            load_error: None,
            refresh,
            unit_choice,
            selected_task_index: 0,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Poll the data source once.
    ///
    /// Returns true if a new payload was received. On failure the previous
    /// chart is kept, auto-refresh stops and the error is reported.
    pub fn reload_data(&mut self) -> bool {
        let polled = self.source.poll();
        self.refresh.mark_polled(Instant::now());

        if let Some(data) = polled {
            self.refresh.on_data(&data);
            self.apply_data(data);
            return true;
        }

        if let Some(err) = self.source.error().map(str::to_string) {
            if self.load_error.as_deref() != Some(err.as_str()) {
                warn!(error = %err, source = self.source.description(), "auto-refresh error");
                self.set_status_message(format!("Auto-refresh Error: {}", err));
            }
            self.load_error = Some(err);
            self.refresh.on_error();
        }

        false
    }

    /// Reload if the auto-refresh policy says a poll is due.
    pub fn tick(&mut self) -> bool {
        if self.refresh.is_due(Instant::now()) {
            self.reload_data()
        } else {
            false
        }
    }

    fn apply_data(&mut self, data: TaskDurationData) {
        let chart = DurationChart::from_data(&data, self.unit_choice);
        debug!(
            tasks = chart.task_ids.len(),
            runs = chart.run_count(),
            unit = %chart.unit,
            "chart rebuilt"
        );
        if self.selected_task_index >= chart.task_ids.len() {
            self.selected_task_index = chart.task_ids.len().saturating_sub(1);
        }
        self.chart = Some(chart);
        self.data = Some(data);
        self.load_error = None;
    }

    fn rebuild_chart(&mut self) {
        if let Some(ref data) = self.data {
            self.chart = Some(DurationChart::from_data(data, self.unit_choice));
        }
    }

    /// Cycle the display unit: auto → seconds → minutes → hours → days → auto.
    pub fn cycle_unit(&mut self) {
        self.unit_choice = self.unit_choice.next();
        self.rebuild_chart();
        self.set_status_message(format!("Unit: {}", self.unit_choice.label()));
    }

    /// Switch auto-refresh on or off.
    ///
    /// Switching on polls right away. If that brings nothing new, the active
    /// runs check is applied to the payload already shown, so a finished
    /// payload switches it straight back off.
    pub fn toggle_auto_refresh(&mut self) {
        if !self.refresh.toggle() {
            self.set_status_message("Auto-refresh off".to_string());
            return;
        }

        if !self.reload_data() {
            if let Some(ref data) = self.data {
                self.refresh.on_data(data);
            }
        }

        if self.refresh.is_on() {
            self.set_status_message("Auto-refresh on".to_string());
        } else if self.load_error.is_none() {
            self.set_status_message("No active runs, auto-refresh off".to_string());
        }
    }

    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    fn task_count(&self) -> usize {
        self.chart.as_ref().map_or(0, |c| c.task_ids.len())
    }

    pub fn select_next(&mut self) {
        let max = self.task_count().saturating_sub(1);
        self.selected_task_index = (self.selected_task_index + 1).min(max);
    }

    pub fn select_prev(&mut self) {
        self.selected_task_index = self.selected_task_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_task_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_task_index = self.task_count().saturating_sub(1);
    }

    /// Task id under the selection cursor.
    pub fn selected_task(&self) -> Option<&str> {
        self.chart
            .as_ref()?
            .task_ids
            .get(self.selected_task_index)
            .map(String::as_str)
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Write the chart option document for the current chart.
    pub fn export_chart(&self, path: &Path) -> Result<()> {
        let Some(ref chart) = self.chart else {
            bail!("No data to export");
        };
        write_chart_option(chart, path)
    }
}

/// Serialize a chart's option document as pretty JSON.
pub fn write_chart_option(chart: &DurationChart, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&chart.to_option())?;
    std::fs::write(path, json)?;
    Ok(())
}
