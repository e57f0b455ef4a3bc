use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

/// What the session store keeps per session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: i64,
    pub username: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

/// The admin behind a valid session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUserDto {
    pub username: String,
}

/// A fresh session; the caller turns `session_id` into a cookie.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub session_id: String,
    pub user: SessionUserDto,
    pub ttl_secs: u64,
}
