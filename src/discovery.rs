//! Queue discovery over the shared key namespace.
//!
//! Bull and BullMQ lay their keys out as `{prefix}:{queueName}:{suffix}`.
//! Discovery scans the namespace once at startup, extracts the distinct queue
//! names and wraps each into a handle for the dashboard. The result is a
//! point-in-time snapshot: queues created later are only picked up on
//! restart.

use std::collections::BTreeSet;

use crate::config::BullConfig;
use crate::queues::QueueHandle;
use crate::store::RedisStore;

/// Runs the discovery pass. A failed listing (store unreachable, timeout)
/// degrades to an empty board rather than failing startup.
pub async fn discover(store: &RedisStore, config: &BullConfig) -> Vec<QueueHandle> {
    let pattern = format!("{}:*", config.prefix);
    let keys = match store.keys(&pattern).await {
        Ok(keys) => keys,
        Err(e) => {
            tracing::error!("Queue discovery failed, starting with an empty board: {}", e);
            return Vec::new();
        }
    };

    let names = queue_names_from_keys(&config.prefix, &keys);
    tracing::info!(
        "Discovered {} queue(s) under prefix '{}'",
        names.len(),
        config.prefix
    );

    names
        .into_iter()
        .map(|name| QueueHandle::new(name, store.clone(), config))
        .collect()
}

/// Distinct queue names embedded in `keys`, sorted lexicographically so the
/// board renders in a stable order across runs.
pub fn queue_names_from_keys(prefix: &str, keys: &[String]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for key in keys {
        match parse_queue_key(prefix, key) {
            Some(name) => {
                names.insert(name.to_string());
            }
            None => tracing::debug!("Skipping key with unexpected layout: {}", key),
        }
    }
    names.into_iter().collect()
}

/// Extracts the queue name from one key.
///
/// A key parses iff it is `{prefix}:{name}:{suffix}` with non-empty name and
/// suffix; the name is everything up to the first ':' after the prefix. Keys
/// that do not fit this shape (a bare `{prefix}:{name}`, an empty segment, a
/// different prefix) are rejected, never best-effort captured. The prefix is
/// matched literally, so prefixes containing ':' behave correctly.
pub fn parse_queue_key<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
    let rest = key.strip_prefix(prefix)?.strip_prefix(':')?;
    let (name, suffix) = rest.split_once(':')?;
    if name.is_empty() || suffix.is_empty() {
        return None;
    }
    Some(name)
}
