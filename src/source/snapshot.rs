//! Wire types for task-duration payloads.
//!
//! These match the JSON served by the orchestrator's task-duration endpoint:
//! an object with a `task_instances` array, one entry per task instance.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Map index used by task instances that are not mapped.
pub const UNMAPPED: i64 = -1;

/// A full task-duration payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDurationData {
    #[serde(default)]
    pub task_instances: Vec<TaskInstance>,
}

/// One execution record of a task within a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInstance {
    pub task_id: String,

    /// Identifies the workflow run this instance belongs to.
    pub execution_date: DateTime<Utc>,

    /// Elapsed seconds. Absent until the instance has finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,

    /// Index of a mapped sub-instance, or [`UNMAPPED`].
    #[serde(default = "unmapped")]
    pub map_index: i64,
}

fn unmapped() -> i64 {
    UNMAPPED
}

impl TaskInstance {
    /// Whether this is one of several indexed sub-instances of a mapped task.
    pub fn is_mapped(&self) -> bool {
        self.map_index >= 0
    }

    /// Whether the instance is still waiting or executing.
    pub fn is_active(&self) -> bool {
        self.state.is_some_and(TaskState::is_active)
    }
}

/// Task instance state as reported by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Scheduled,
    Queued,
    Running,
    Success,
    Failed,
    Skipped,
    UpForRetry,
    UpForReschedule,
    UpstreamFailed,
    Removed,
    Restarting,
    Deferred,
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Queued and running instances keep a run "active" for auto-refresh.
    pub fn is_active(self) -> bool {
        matches!(self, TaskState::Queued | TaskState::Running)
    }
}

impl TaskDurationData {
    /// Load a payload from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a payload from a JSON string.
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.task_instances.is_empty()
    }
}

/// True when any instance is queued or running.
pub fn has_active_runs(task_instances: &[TaskInstance]) -> bool {
    task_instances.iter().any(TaskInstance::is_active)
}
