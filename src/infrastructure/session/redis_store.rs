//! Redis-backed session store.

use std::fmt;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tracing::info;

/// Session records stored as JSON under `session:{id}` with a Redis TTL
/// matching the record's expiry date.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

fn backend(e: redis::RedisError) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

/// Seconds until `expiry`, at least one so Redis accepts the TTL.
fn ttl_seconds(expiry: OffsetDateTime) -> u64 {
    let remaining = (expiry - OffsetDateTime::now_utc()).whole_seconds();
    remaining.max(1) as u64
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns the Redis error if the URL is invalid, the connection cannot be
    /// established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("✓ Connected to Redis session store");

        Ok(Self {
            conn: manager,
            key_prefix: "session:".to_string(),
        })
    }

    fn build_key(&self, id: &Id) -> String {
        format!("{}{}", self.key_prefix, id)
    }

    fn encode(record: &Record) -> session_store::Result<String> {
        serde_json::to_string(record).map_err(|e| session_store::Error::Encode(e.to_string()))
    }

    pub async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut conn = self.conn.clone();
        let payload = Self::encode(record)?;
        let ttl = ttl_seconds(record.expiry_date);

        // Regenerate the id until SET NX succeeds so no live session is overwritten.
        loop {
            let created: Option<String> = redis::cmd("SET")
                .arg(self.build_key(&record.id))
                .arg(&payload)
                .arg("NX")
                .arg("EX")
                .arg(ttl)
                .query_async(&mut conn)
                .await
                .map_err(backend)?;

            if created.is_some() {
                return Ok(());
            }
            record.id = Id::default();
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let mut conn = self.conn.clone();
        let payload = Self::encode(record)?;

        conn.set_ex::<_, _, ()>(
            self.build_key(&record.id),
            payload,
            ttl_seconds(record.expiry_date),
        )
        .await
        .map_err(backend)
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let mut conn = self.conn.clone();

        let payload: Option<String> = conn
            .get(self.build_key(session_id))
            .await
            .map_err(backend)?;

        payload
            .map(|json| {
                serde_json::from_str::<Record>(&json)
                    .map_err(|e| session_store::Error::Decode(e.to_string()))
            })
            .transpose()
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(self.build_key(session_id))
            .await
            .map_err(backend)
    }
}
