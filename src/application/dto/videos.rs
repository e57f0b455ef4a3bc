use crate::domain::video::Video;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CategoryRefDto, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDto {
    pub id: i64,
    pub title: String,
    pub youtube_id: String,
    pub cover_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRefDto>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoDto {
    fn from(video: Video) -> Self {
        Self {
            id: video.id.into(),
            title: video.title.to_string(),
            youtube_id: video.youtube_id.to_string(),
            cover_url: video.cover.url,
            category: video.category.map(Into::into),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}
