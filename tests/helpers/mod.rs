use qboard::config::BullConfig;
use qboard::queues::QueueVariant;
use qboard::store::RedisStore;

pub fn bull_config(prefix: &str, variant: QueueVariant) -> BullConfig {
    BullConfig {
        prefix: prefix.to_string(),
        variant,
    }
}

/// A store whose every operation answers `Unavailable`, for exercising the
/// degraded paths without a live Redis.
pub fn disconnected_store() -> RedisStore {
    RedisStore::disconnected()
}

pub fn keys(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}
