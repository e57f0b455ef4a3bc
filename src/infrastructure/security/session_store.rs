// src/infrastructure/security/session_store.rs
use crate::application::ApplicationResult;
use crate::application::dto::SessionRecord;
use crate::application::error::ApplicationError;
use crate::application::ports::security::SessionStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::session_key;

/// Process-local sessions, used when no Redis URL is configured.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, (SessionRecord, Instant)>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ApplicationResult<MutexGuard<'_, HashMap<String, (SessionRecord, Instant)>>> {
        self.entries
            .lock()
            .map_err(|_| ApplicationError::infrastructure("session store lock poisoned"))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(
        &self,
        session_id: &str,
        record: &SessionRecord,
        ttl_secs: u64,
    ) -> ApplicationResult<()> {
        let expires_at = Instant::now()
            .checked_add(Duration::from_secs(ttl_secs))
            .ok_or_else(|| ApplicationError::infrastructure("session ttl out of range"))?;
        let mut guard = self.lock()?;
        // Drop anything already expired while we hold the lock.
        let now = Instant::now();
        guard.retain(|_, (_, exp)| *exp > now);
        guard.insert(session_key(session_id), (record.clone(), expires_at));
        Ok(())
    }

    async fn get(&self, session_id: &str) -> ApplicationResult<Option<SessionRecord>> {
        let key = session_key(session_id);
        let mut guard = self.lock()?;
        match guard.get(&key) {
            Some((record, expires_at)) if *expires_at > Instant::now() => Ok(Some(record.clone())),
            Some(_) => {
                guard.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, session_id: &str) -> ApplicationResult<()> {
        self.lock()?.remove(&session_key(session_id));
        Ok(())
    }
}
