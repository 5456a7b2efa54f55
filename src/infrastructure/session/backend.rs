//! Session backend selection.

use async_trait::async_trait;
use tower_sessions::MemoryStore;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tracing::{info, warn};

use super::redis_store::RedisSessionStore;

/// Session store chosen at startup: Redis when configured and reachable,
/// process memory otherwise.
#[derive(Debug, Clone)]
pub enum SessionBackend {
    Redis(RedisSessionStore),
    Memory(MemoryStore),
}

impl SessionBackend {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    /// Connects to Redis if a URL is given, falling back to memory on failure.
    pub async fn connect(redis_url: Option<&str>) -> Self {
        match redis_url {
            Some(url) => match RedisSessionStore::connect(url).await {
                Ok(store) => {
                    info!("Sessions stored in Redis");
                    Self::Redis(store)
                }
                Err(e) => {
                    warn!("Failed to connect to Redis: {}. Using in-memory sessions.", e);
                    Self::memory()
                }
            },
            None => {
                info!("Sessions stored in memory (Redis not configured)");
                Self::memory()
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Redis(_) => "redis",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn health_check(&self) -> bool {
        match self {
            Self::Redis(store) => store.health_check().await,
            Self::Memory(_) => true,
        }
    }
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            Self::Redis(store) => store.create(record).await,
            Self::Memory(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            Self::Redis(store) => store.save(record).await,
            Self::Memory(store) => store.save(record).await,
        }
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            Self::Redis(store) => store.load(session_id).await,
            Self::Memory(store) => store.load(session_id).await,
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        match self {
            Self::Redis(store) => store.delete(session_id).await,
            Self::Memory(store) => store.delete(session_id).await,
        }
    }
}
