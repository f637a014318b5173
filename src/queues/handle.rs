use serde::Serialize;

use crate::config::BullConfig;
use crate::store::{RedisStore, StoreError};

/// Key namespace Bull falls back to when none is configured.
pub const DEFAULT_BULL_PREFIX: &str = "bull";

// ---------- QueueVariant ----------

/// Which queue library owns the keys. Chosen once per process from
/// configuration; a discovery pass never mixes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueVariant {
    Bull,
    BullMq,
}

impl QueueVariant {
    /// Parses the BULL_VERSION selector. Anything that is not "BULLMQ" is
    /// treated as classic Bull.
    pub fn from_version(version: &str) -> Self {
        if version.eq_ignore_ascii_case("BULLMQ") {
            QueueVariant::BullMq
        } else {
            QueueVariant::Bull
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueVariant::Bull => "bull",
            QueueVariant::BullMq => "bullmq",
        }
    }
}

// ---------- JobCounts ----------

/// Per-state job counts for one queue. `prioritized` and `waiting_children`
/// only exist in the BullMQ layout and are omitted from the JSON otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobCounts {
    pub waiting: u64,
    pub active: u64,
    pub completed: u64,
    pub failed: u64,
    pub delayed: u64,
    pub paused: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioritized: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_children: Option<u64>,
}

// ---------- QueueHandle ----------

/// In-memory adapter for one discovered queue. Lives exactly as long as the
/// process; owned by the registry built from the discovery pass.
pub enum QueueHandle {
    Bull(BullQueue),
    BullMq(BullMqQueue),
}

impl QueueHandle {
    /// Wraps a discovered name into the handle variant selected by
    /// configuration.
    pub fn new(name: String, store: RedisStore, config: &BullConfig) -> Self {
        match config.variant {
            QueueVariant::Bull => QueueHandle::Bull(BullQueue::new(name, store)),
            QueueVariant::BullMq => QueueHandle::BullMq(BullMqQueue::new(
                name,
                store,
                Some(config.prefix.clone()),
            )),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            QueueHandle::Bull(q) => &q.name,
            QueueHandle::BullMq(q) => &q.name,
        }
    }

    pub fn variant(&self) -> QueueVariant {
        match self {
            QueueHandle::Bull(_) => QueueVariant::Bull,
            QueueHandle::BullMq(_) => QueueVariant::BullMq,
        }
    }

    pub async fn counts(&self) -> Result<JobCounts, StoreError> {
        match self {
            QueueHandle::Bull(q) => q.counts().await,
            QueueHandle::BullMq(q) => q.counts().await,
        }
    }
}

// ---------- BullQueue ----------

/// Classic Bull adapter. Constructed against the raw connection only: Bull
/// keeps its keys under its own fixed `bull` namespace regardless of the
/// prefix the discovery scan used.
pub struct BullQueue {
    pub name: String,
    store: RedisStore,
}

impl BullQueue {
    pub fn new(name: String, store: RedisStore) -> Self {
        Self { name, store }
    }

    fn state_key(&self, state: &str) -> String {
        format!("{}:{}:{}", DEFAULT_BULL_PREFIX, self.name, state)
    }

    /// Reads the per-state counts. `wait`, `active` and `paused` are lists;
    /// `delayed`, `completed` and `failed` are sorted sets.
    pub async fn counts(&self) -> Result<JobCounts, StoreError> {
        Ok(JobCounts {
            waiting: self.store.list_len(&self.state_key("wait")).await?,
            active: self.store.list_len(&self.state_key("active")).await?,
            paused: self.store.list_len(&self.state_key("paused")).await?,
            delayed: self.store.sorted_set_len(&self.state_key("delayed")).await?,
            completed: self.store.sorted_set_len(&self.state_key("completed")).await?,
            failed: self.store.sorted_set_len(&self.state_key("failed")).await?,
            prioritized: None,
            waiting_children: None,
        })
    }
}

// ---------- BullMqQueue ----------

/// BullMQ adapter. Takes an optional explicit prefix override for key
/// namespaces that are themselves prefixed; falls back to `bull` like the
/// library does.
pub struct BullMqQueue {
    pub name: String,
    store: RedisStore,
    prefix: String,
}

impl BullMqQueue {
    pub fn new(name: String, store: RedisStore, prefix: Option<String>) -> Self {
        Self {
            name,
            store,
            prefix: prefix.unwrap_or_else(|| DEFAULT_BULL_PREFIX.to_string()),
        }
    }

    pub fn key_prefix(&self) -> &str {
        &self.prefix
    }

    fn state_key(&self, state: &str) -> String {
        format!("{}:{}:{}", self.prefix, self.name, state)
    }

    pub async fn counts(&self) -> Result<JobCounts, StoreError> {
        Ok(JobCounts {
            waiting: self.store.list_len(&self.state_key("wait")).await?,
            active: self.store.list_len(&self.state_key("active")).await?,
            paused: self.store.list_len(&self.state_key("paused")).await?,
            delayed: self.store.sorted_set_len(&self.state_key("delayed")).await?,
            completed: self.store.sorted_set_len(&self.state_key("completed")).await?,
            failed: self.store.sorted_set_len(&self.state_key("failed")).await?,
            prioritized: Some(
                self.store
                    .sorted_set_len(&self.state_key("prioritized"))
                    .await?,
            ),
            waiting_children: Some(
                self.store
                    .sorted_set_len(&self.state_key("waiting-children"))
                    .await?,
            ),
        })
    }
}
