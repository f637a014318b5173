use serde::Serialize;

use crate::queues::JobCounts;

#[derive(Serialize)]
pub struct BoardSnapshot {
    pub queues: Vec<QueueSummary>,
}

#[derive(Serialize)]
pub struct QueueSummary {
    pub name: String,
    pub counts: JobCounts,
}
