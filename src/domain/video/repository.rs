use crate::domain::category::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::video::entity::{NewVideo, Video, VideoUpdate};
use crate::domain::video::value_objects::VideoId;
use async_trait::async_trait;

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Newest first.
    async fn list(&self) -> DomainResult<Vec<Video>>;
    async fn find_by_id(&self, id: VideoId) -> DomainResult<Option<Video>>;
    async fn insert(&self, video: NewVideo) -> DomainResult<Video>;
    async fn update(&self, update: VideoUpdate) -> DomainResult<Video>;
    async fn delete(&self, id: VideoId) -> DomainResult<Video>;
    async fn any_in_category(&self, category_id: CategoryId) -> DomainResult<bool>;
}
