// src/infrastructure/security/redis_session_store.rs
use crate::application::ApplicationResult;
use crate::application::dto::SessionRecord;
use crate::application::error::ApplicationError;
use crate::application::ports::security::SessionStore;
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;

use super::session_key;

#[derive(Clone)]
pub struct RedisSessionStore {
    pool: Pool,
}

impl RedisSessionStore {
    /// Create a new Redis backed session store from a redis URL (e.g. redis://:password@host:6379/0)
    pub fn from_url(url: &str) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn conn(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(
        &self,
        session_id: &str,
        record: &SessionRecord,
        ttl_secs: u64,
    ) -> ApplicationResult<()> {
        let payload = serde_json::to_string(record)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let mut conn = self.conn().await?;
        conn.set_ex::<_, _, ()>(session_key(session_id), payload, ttl_secs.max(1))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }

    async fn get(&self, session_id: &str) -> ApplicationResult<Option<SessionRecord>> {
        let mut conn = self.conn().await?;
        let payload: Option<String> = conn
            .get(session_key(session_id))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        match payload {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(record) => Ok(Some(record)),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable session payload");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn remove(&self, session_id: &str) -> ApplicationResult<()> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(session_key(session_id))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }
}
