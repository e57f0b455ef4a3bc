use crate::domain::contact::ContactMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: String,
    pub content: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for ContactDto {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: message.id.0,
            name: message.name,
            email: message.email,
            phone: message.phone,
            title: message.title,
            content: message.content,
            created_at: message.created_at,
        }
    }
}
