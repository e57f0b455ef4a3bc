use std::sync::Arc;

use crate::{
    application::{
        dto::{ListResponse, VideoDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::video::{VideoId, VideoRepository},
};

pub struct VideoQueryService {
    repo: Arc<dyn VideoRepository>,
}

impl VideoQueryService {
    pub fn new(repo: Arc<dyn VideoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_videos(&self) -> ApplicationResult<ListResponse<VideoDto>> {
        Ok(self.repo.list().await?.into_iter().collect())
    }

    pub async fn get_video(&self, id: i64) -> ApplicationResult<VideoDto> {
        let id = VideoId::new(id).map_err(|_| ApplicationError::validation("invalid video id"))?;
        self.repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("video not found"))
    }
}
