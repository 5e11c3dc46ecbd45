//! Auto-refresh policy.
//!
//! Polling runs while the dashboard has something worth watching: it is
//! switched off once no run is queued or running, and after any load error.

use std::time::{Duration, Instant};

use tracing::info;

use crate::source::{has_active_runs, TaskDurationData};

#[derive(Debug, Clone)]
pub struct AutoRefresh {
    enabled: bool,
    interval: Duration,
    last_poll: Option<Instant>,
}

impl AutoRefresh {
    pub fn new(enabled: bool, interval: Duration) -> Self {
        Self {
            enabled,
            interval,
            last_poll: None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.enabled
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a poll is due at `now`.
    ///
    /// The first call is always due so the initial payload gets loaded even
    /// when auto-refresh starts switched off.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_poll {
            None => true,
            Some(last) => self.enabled && now.duration_since(last) >= self.interval,
        }
    }

    pub fn mark_polled(&mut self, now: Instant) {
        self.last_poll = Some(now);
    }

    /// Apply the policy to a freshly loaded payload.
    pub fn on_data(&mut self, data: &TaskDurationData) {
        if self.enabled && !has_active_runs(&data.task_instances) {
            info!("no active runs, stopping auto-refresh");
            self.enabled = false;
        }
    }

    pub fn on_error(&mut self) {
        if self.enabled {
            info!("load error, stopping auto-refresh");
            self.enabled = false;
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}
