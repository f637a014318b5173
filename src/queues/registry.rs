use crate::dashboard::models::queues::{BoardSnapshot, QueueSummary};
use crate::queues::{JobCounts, QueueHandle};

/// Immutable set of queue handles produced by the startup discovery pass.
/// Built once, read-only for the rest of the process lifetime.
pub struct QueueRegistry {
    handles: Vec<QueueHandle>,
}

impl QueueRegistry {
    pub fn new(handles: Vec<QueueHandle>) -> Self {
        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.handles.iter().map(|h| h.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&QueueHandle> {
        self.handles.iter().find(|h| h.name() == name)
    }

    pub fn handles(&self) -> &[QueueHandle] {
        &self.handles
    }

    /// Collects the board snapshot. A queue whose counts cannot be read
    /// degrades to zero counts instead of failing the whole snapshot.
    pub async fn snapshot(&self) -> BoardSnapshot {
        let mut queues = Vec::with_capacity(self.handles.len());
        for handle in &self.handles {
            let counts = match handle.counts().await {
                Ok(counts) => counts,
                Err(e) => {
                    tracing::warn!("Failed to read counts for queue '{}': {}", handle.name(), e);
                    JobCounts::default()
                }
            };
            queues.push(QueueSummary {
                name: handle.name().to_string(),
                counts,
            });
        }
        BoardSnapshot { queues }
    }
}
