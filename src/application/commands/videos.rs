// src/application/commands/videos.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::resolve_category,
        dto::VideoDto,
        error::{ApplicationError, ApplicationResult},
        ports::{media::CoverFetcher, time::Clock},
    },
    domain::{
        category::CategoryRepository,
        video::{NewVideo, VideoId, VideoRepository, VideoTitle, VideoUpdate, YoutubeId},
    },
};

pub struct CreateVideoCommand {
    pub title: String,
    pub youtube_id: String,
    pub category_id: Option<i64>,
}

/// `category_id: Some(None)` clears the category.
pub struct UpdateVideoCommand {
    pub id: i64,
    pub title: Option<String>,
    pub youtube_id: Option<String>,
    pub category_id: Option<Option<i64>>,
}

pub struct DeleteVideoCommand {
    pub id: i64,
}

pub struct VideoCommandService {
    repo: Arc<dyn VideoRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    covers: Arc<dyn CoverFetcher>,
    clock: Arc<dyn Clock>,
}

impl VideoCommandService {
    pub fn new(
        repo: Arc<dyn VideoRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        covers: Arc<dyn CoverFetcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            category_repo,
            covers,
            clock,
        }
    }

    pub async fn create_video(&self, command: CreateVideoCommand) -> ApplicationResult<VideoDto> {
        let title = VideoTitle::new(command.title)?;
        let youtube_id = YoutubeId::new(command.youtube_id)?;
        let category_id =
            resolve_category(self.category_repo.as_ref(), command.category_id, None).await?;

        let cover = self.covers.fetch_cover(youtube_id.as_str()).await;
        if cover.is_empty() {
            tracing::warn!(youtube_id = %youtube_id, "no thumbnail stored; video saved without cover");
        }

        let now = self.clock.now();
        let created = self
            .repo
            .insert(NewVideo {
                title,
                youtube_id,
                cover,
                category_id,
                created_at: now,
                updated_at: now,
            })
            .await?;
        Ok(created.into())
    }

    pub async fn update_video(&self, command: UpdateVideoCommand) -> ApplicationResult<VideoDto> {
        let id = parse_id(command.id)?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("video not found"))?;

        let mut update = VideoUpdate::new(id, self.clock.now());
        update.title = command.title.map(VideoTitle::new).transpose()?;

        update.category_id = match command.category_id {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(
                resolve_category(self.category_repo.as_ref(), Some(raw), None).await?,
            ),
        };

        let youtube_id = command
            .youtube_id
            .filter(|raw| !raw.trim().is_empty())
            .map(YoutubeId::new)
            .transpose()?;
        let replaces_cover = match youtube_id.filter(|y| *y != existing.youtube_id) {
            Some(youtube_id) => {
                update.cover = Some(self.covers.fetch_cover(youtube_id.as_str()).await);
                update.youtube_id = Some(youtube_id);
                true
            }
            None => false,
        };

        let updated = self.repo.update(update).await?;
        // The old cover goes only once the row points at the new one.
        if replaces_cover {
            self.covers.remove_cover(existing.cover_handle()).await;
        }
        Ok(updated.into())
    }

    pub async fn delete_video(&self, command: DeleteVideoCommand) -> ApplicationResult<()> {
        let id = parse_id(command.id)?;
        let removed = self.repo.delete(id).await?;
        self.covers.remove_cover(removed.cover_handle()).await;
        Ok(())
    }
}

fn parse_id(raw: i64) -> ApplicationResult<VideoId> {
    VideoId::new(raw).map_err(|_| ApplicationError::validation("invalid video id"))
}
