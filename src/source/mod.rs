//! Data sources for task-duration payloads.
//!
//! The dashboard does not fetch over HTTP itself. Payloads come from a file
//! written by some other process, or are pushed in through a channel by an
//! embedding application.

mod channel;
mod file;
mod snapshot;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use snapshot::{has_active_runs, TaskDurationData, TaskInstance, TaskState, UNMAPPED};

use std::fmt::Debug;

/// Trait for receiving task-duration payloads from various sources.
///
/// # Example
///
/// ```
/// use task_duration::{DataSource, FileSource};
///
/// let mut source = FileSource::new("durations.json");
/// if let Some(data) = source.poll() {
///     println!("Got {} task instances", data.task_instances.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest payload.
    ///
    /// Returns `Some(data)` if a new payload is available, `None` otherwise.
    /// Must not block.
    fn poll(&mut self) -> Option<TaskDurationData>;

    /// Human-readable description of the source, shown in the status bar.
    fn description(&self) -> &str;

    /// The error from the last poll, if it failed.
    fn error(&self) -> Option<&str>;
}
