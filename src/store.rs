//! Shared Redis connection, wrapped so an unreachable store degrades the
//! dashboard instead of killing it.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use thiserror::Error;

use crate::config::RedisConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The initial connection never succeeded; every operation answers this.
    #[error("Redis connection is not available")]
    Unavailable,

    #[error("Redis operation failed: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Handle to the single shared Redis connection. Cheap to clone; the
/// underlying `ConnectionManager` serializes requests and reconnects on its
/// own, which covers the retry policy the dashboard needs.
#[derive(Clone)]
pub struct RedisStore {
    conn: Option<ConnectionManager>,
}

impl RedisStore {
    /// Connects to Redis. A failed initial connection is logged and produces
    /// a disconnected store rather than an error: the dashboard still starts,
    /// it just shows no queues.
    pub async fn connect(config: &RedisConfig) -> Self {
        match Self::try_connect(config).await {
            Ok(conn) => {
                tracing::info!(
                    "Redis client ready ({}:{} db {})",
                    config.host,
                    config.port,
                    config.db
                );
                Self { conn: Some(conn) }
            }
            Err(e) => {
                tracing::error!(
                    "Redis connection failed ({}:{}): {}",
                    config.host,
                    config.port,
                    e
                );
                Self { conn: None }
            }
        }
    }

    async fn try_connect(config: &RedisConfig) -> Result<ConnectionManager, redis::RedisError> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
            redis: RedisConnectionInfo {
                db: config.db,
                username: None,
                password: config.password.clone(),
            },
        };
        let client = redis::Client::open(info)?;
        ConnectionManager::new(client).await
    }

    /// A store with no backing connection. This is what `connect` degrades
    /// to, and what tests use to exercise the unavailable paths.
    pub fn disconnected() -> Self {
        Self { conn: None }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn conn(&self) -> Result<ConnectionManager, StoreError> {
        self.conn.clone().ok_or(StoreError::Unavailable)
    }

    /// KEYS scan. One bulk call, no cursor: fine for dashboard-sized
    /// keyspaces, a known ceiling for very large ones.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn()?;
        Ok(conn.keys(pattern).await?)
    }

    pub async fn list_len(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn()?;
        Ok(conn.llen(key).await?)
    }

    pub async fn sorted_set_len(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn()?;
        Ok(conn.zcard(key).await?)
    }

    pub async fn set_ex(&self, key: &str, value: &str, seconds: usize) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        conn.set_ex::<_, _, ()>(key, value, seconds as u64).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn()?;
        Ok(conn.get(key).await?)
    }

    pub async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}
