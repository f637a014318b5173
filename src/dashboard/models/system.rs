use serde::Serialize;

#[derive(Serialize)]
pub struct SystemSnapshot {
    pub uptime_secs: u64,
    pub redis_connected: bool,
    pub queue_variant: String,
    pub bull_prefix: String,
    pub queue_count: usize,
    pub started_at: String,
}
