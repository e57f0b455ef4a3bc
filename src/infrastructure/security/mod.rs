// src/infrastructure/security/mod.rs
pub mod cookie;
pub mod password;
pub mod redis_session_store;
pub mod session_store;

/// Storage key for a session id. Raw ids never reach the store.
pub(crate) fn session_key(session_id: &str) -> String {
    format!("session:{}", blake3::hash(session_id.as_bytes()).to_hex())
}
