mod handle;
mod registry;

pub use handle::{BullMqQueue, BullQueue, JobCounts, QueueHandle, QueueVariant, DEFAULT_BULL_PREFIX};
pub use registry::QueueRegistry;
