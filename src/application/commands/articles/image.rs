// src/application/commands/articles/image.rs
use super::ArticleCommandService;
use crate::{
    application::{
        commands::FileUpload,
        dto::{ArticleImageDto, ImageOnlyDto},
        error::{ApplicationError, ApplicationResult},
        ports::media::IngestedImage,
    },
    domain::article::{ArticleId, ArticleImage, ArticleUpdate, ImageAlt},
};

/// Image fields as sent by the admin panel.
#[derive(Debug, Clone, Default)]
pub struct ArticleImageInput {
    pub url: Option<String>,
    pub alt: Option<String>,
    pub tiny_url: Option<String>,
}

pub struct ReplaceArticleImageCommand {
    pub id: i64,
    pub file: FileUpload,
}

impl ArticleCommandService {
    /// Ingest a new image from either an uploaded file or a remote URL.
    /// Returns `None` when neither is provided.
    pub(super) async fn ingest_image(
        &self,
        file: Option<FileUpload>,
        remote_url: Option<&str>,
    ) -> ApplicationResult<Option<IngestedImage>> {
        if let Some(file) = file {
            return self
                .images
                .ingest_bytes(file.data, &file.file_name)
                .await
                .map(Some);
        }
        match remote_url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(ApplicationError::validation("image url must be an http(s) URL"));
                }
                self.images.ingest_remote(url).await.map(Some)
            }
            None => Ok(None),
        }
    }

    /// Release a freshly ingested image after the write that would have
    /// referenced it failed.
    pub(super) async fn discard(&self, ingested: Option<&IngestedImage>) {
        if let Some(image) = ingested {
            self.images.release(&image.public_id).await;
        }
    }

    /// Replace only the image of an article, keeping its alt text.
    pub async fn replace_article_image(
        &self,
        command: ReplaceArticleImageCommand,
    ) -> ApplicationResult<ImageOnlyDto> {
        let id = ArticleId::new(command.id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let ingested = self.images.ingest_bytes(command.file.data, &command.file.file_name).await?;
        let image = ArticleImage {
            url: ingested.url.clone(),
            alt: existing.image.alt.clone(),
            tiny_url: Some(ingested.tiny_url.clone()),
            public_id: Some(ingested.public_id.clone()),
        };

        let mut update = ArticleUpdate::new(id, existing.updated_at).with_image(image);
        update.set_updated_at(self.clock.now());

        if let Err(err) = self.write_repo.update(update).await {
            self.discard(Some(&ingested)).await;
            return Err(err.into());
        }
        if let Some(old) = existing.image.public_id.as_deref() {
            self.images.release(old).await;
        }

        Ok(ImageOnlyDto {
            image: ArticleImageDto {
                url: ingested.url,
                alt: None,
                tiny_url: Some(ingested.tiny_url),
            },
        })
    }
}

pub(super) fn image_from_ingested(ingested: &IngestedImage, alt: ImageAlt) -> ArticleImage {
    ArticleImage {
        url: ingested.url.clone(),
        alt,
        tiny_url: Some(ingested.tiny_url.clone()),
        public_id: Some(ingested.public_id.clone()),
    }
}
