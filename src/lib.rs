pub mod config;
pub mod dashboard;
pub mod discovery;
pub mod queues;
pub mod store;

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::dashboard::auth::SessionStore;
use crate::queues::QueueRegistry;
use crate::store::RedisStore;

// ========================================
// ENGINE (process context)
// ========================================

/// Process-wide context handed to the dashboard server as axum state.
/// Cheap to clone (Arcs plus a connection handle). Built once in `main`
/// after the discovery pass, read-only afterwards, dropped at exit.
#[derive(Clone)]
pub struct BoardEngine {
    pub registry: Arc<QueueRegistry>,
    pub store: RedisStore,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

impl BoardEngine {
    pub fn new(config: Config, store: RedisStore, registry: QueueRegistry) -> Self {
        let sessions = Arc::new(SessionStore::new(
            store.clone(),
            config.auth.session_ttl_secs,
        ));
        Self {
            registry: Arc::new(registry),
            store,
            sessions,
            config: Arc::new(config),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }
}
