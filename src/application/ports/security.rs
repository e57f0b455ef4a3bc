// src/application/ports/security.rs
use crate::application::{ApplicationResult, dto::SessionRecord};
use async_trait::async_trait;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()>;
}

/// Server-side session storage keyed by the opaque session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(
        &self,
        session_id: &str,
        record: &SessionRecord,
        ttl_secs: u64,
    ) -> ApplicationResult<()>;
    /// Expired sessions read as `None`.
    async fn get(&self, session_id: &str) -> ApplicationResult<Option<SessionRecord>>;
    async fn remove(&self, session_id: &str) -> ApplicationResult<()>;
}
