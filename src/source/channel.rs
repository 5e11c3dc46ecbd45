//! Channel-based data source.
//!
//! Receives task-duration payloads via a tokio watch channel, for embedding
//! applications that fetch the data themselves and push it in.

use tokio::sync::watch;

use super::{DataSource, TaskDurationData};

/// A data source fed by a watch channel.
///
/// # Example
///
/// ```
/// use task_duration::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("orchestrator api");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<TaskDurationData>,
    description: String,
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a channel source from the receiving end of a watch channel.
    pub fn new(receiver: watch::Receiver<TaskDurationData>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            initial_returned: false,
        }
    }

    /// Create a sender/source pair. The channel starts with an empty payload.
    pub fn create(source_description: &str) -> (watch::Sender<TaskDurationData>, Self) {
        let (tx, rx) = watch::channel(TaskDurationData::default());
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<TaskDurationData> {
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TaskInstance;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");

        // Initial empty payload
        let data = source.poll().unwrap();
        assert!(data.is_empty());

        assert!(source.poll().is_none());

        let payload = TaskDurationData {
            task_instances: vec![TaskInstance {
                task_id: "report".to_string(),
                execution_date: "2024-05-01T00:00:00Z".parse().unwrap(),
                duration: Some(3.0),
                state: None,
                map_index: -1,
            }],
        };
        tx.send(payload).unwrap();

        let data = source.poll().unwrap();
        assert_eq!(data.task_instances.len(), 1);
        assert!(source.error().is_none());
    }
}
