// src/application/commands/articles/update.rs
use super::{
    ArticleCommandService,
    create::clean_keywords,
    image::{ArticleImageInput, image_from_ingested},
};
use crate::{
    application::{
        commands::{FileUpload, resolve_category, slug_base},
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
        ports::media::IngestedImage,
    },
    domain::{
        article::{
            Article, ArticleContent, ArticleId, ArticleImage, ArticleSlugIndex, ArticleTitle,
            ArticleUpdate, ImageAlt, ReadingMinutes,
        },
        slug::{Slug, commit_with_retry},
    },
};

/// Partial update. `None` keeps the stored value; the nested options on
/// `summary` and `reading_minutes` carry an explicit `null` as `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub image: Option<ArticleImageInput>,
    pub summary: Option<Option<String>>,
    pub category_id: Option<i64>,
    pub category: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub reading_minutes: Option<Option<i32>>,
    pub file: Option<FileUpload>,
}

impl ArticleCommandService {
    pub async fn update_article(&self, command: UpdateArticleCommand) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let UpdateArticleCommand {
            id: _,
            title,
            content,
            slug,
            image,
            summary,
            category_id,
            category,
            keywords,
            reading_minutes,
            file,
        } = command;

        let now = self.clock.now();
        let mut update = ArticleUpdate::new(id, existing.updated_at);
        update.set_updated_at(now);

        let title = title.map(ArticleTitle::new).transpose()?;
        if let Some(content) = content {
            update = update.with_content(ArticleContent::new(content)?);
        }
        if let Some(summary) = summary {
            update = update.with_summary(summary.filter(|s| !s.trim().is_empty()));
        }
        if let Some(keywords) = keywords {
            update = update.with_keywords(clean_keywords(keywords));
        }
        if let Some(minutes) = reading_minutes {
            update = update.with_reading_minutes(minutes.map(ReadingMinutes::new).transpose()?);
        }
        if let Some(category_id) =
            resolve_category(self.category_repo.as_ref(), category_id, category.as_deref()).await?
        {
            update = update.with_category(category_id);
        }

        // Recompute the slug from an override, or from a changed title.
        let slug_source = match (&slug, &title) {
            (Some(raw), _) => Some((Some(raw.as_str()), existing.title.as_str())),
            (None, Some(new_title)) if new_title != &existing.title => {
                Some((None, new_title.as_str()))
            }
            _ => None,
        };
        let base = slug_source
            .map(|(raw, text)| slug_base(self.slugger.as_ref(), raw, text, "article", now))
            .transpose()?;
        if let Some(title) = title {
            update = update.with_title(title);
        }

        let (new_image, ingested) = self.next_image(&existing, image, file).await?;
        if let Some(image) = new_image {
            update = update.with_image(image);
        }

        let result = match base {
            Some(base) => {
                let index = ArticleSlugIndex::new(self.read_repo.as_ref(), Some(id));
                let write_repo = self.write_repo.as_ref();
                let draft = &update;
                commit_with_retry(&base, &index, |candidate| {
                    let mut attempt = draft.clone();
                    async move {
                        attempt.slug = Some(Slug::new(candidate)?);
                        write_repo.update(attempt).await
                    }
                })
                .await
            }
            None => self.write_repo.update(update).await,
        };

        match result {
            Ok(updated) => {
                if let (Some(_), Some(old)) = (&ingested, existing.image.public_id.as_deref()) {
                    self.images.release(old).await;
                }
                tracing::info!(article_id = id.0, slug = %updated.slug, "article updated");
                Ok(updated.into())
            }
            Err(err) => {
                self.discard(ingested.as_ref()).await;
                Err(err.into())
            }
        }
    }

    /// Work out the replacement image, if any. A new file or a changed URL is
    /// ingested; otherwise only alt text and placeholder are edited.
    async fn next_image(
        &self,
        existing: &Article,
        input: Option<ArticleImageInput>,
        file: Option<FileUpload>,
    ) -> ApplicationResult<(Option<ArticleImage>, Option<IngestedImage>)> {
        let input_alt = input
            .as_ref()
            .and_then(|i| i.alt.as_deref())
            .map(ImageAlt::new)
            .transpose()?;
        let alt = || input_alt.clone().unwrap_or_else(|| existing.image.alt.clone());

        if file.is_some() {
            let ingested = self.ingest_image(file, None).await?;
            return match ingested {
                Some(ingested) => Ok((Some(image_from_ingested(&ingested, alt())), Some(ingested))),
                None => Ok((None, None)),
            };
        }

        let Some(input) = input else {
            return Ok((None, None));
        };

        let changed_url = input
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty() && *u != existing.image.url);
        if let Some(url) = changed_url {
            let ingested = self.ingest_image(None, Some(url)).await?;
            if let Some(ingested) = ingested {
                return Ok((Some(image_from_ingested(&ingested, alt())), Some(ingested)));
            }
        }

        let image = ArticleImage {
            url: existing.image.url.clone(),
            alt: alt(),
            tiny_url: input.tiny_url.or_else(|| existing.image.tiny_url.clone()),
            public_id: existing.image.public_id.clone(),
        };
        Ok((Some(image), None))
    }
}
