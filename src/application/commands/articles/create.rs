// src/application/commands/articles/create.rs
use super::{ArticleCommandService, image::ArticleImageInput, image::image_from_ingested};
use crate::{
    application::{
        commands::{FileUpload, resolve_category, slug_base},
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{
            ArticleContent, ArticleSlugIndex, ArticleTitle, ImageAlt, NewArticle, ReadingMinutes,
        },
        slug::{Slug, commit_with_retry},
    },
};

#[derive(Debug, Clone, Default)]
pub struct CreateArticleCommand {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    pub image: Option<ArticleImageInput>,
    pub summary: Option<String>,
    pub category_id: Option<i64>,
    pub category: Option<String>,
    pub keywords: Vec<String>,
    pub reading_minutes: Option<i32>,
    pub file: Option<FileUpload>,
}

impl ArticleCommandService {
    pub async fn create_article(&self, command: CreateArticleCommand) -> ApplicationResult<ArticleDto> {
        let CreateArticleCommand {
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

        let title = ArticleTitle::new(title)?;
        let content = ArticleContent::new(content)?;
        let image = image.unwrap_or_default();
        let alt = match image.alt.as_deref() {
            Some(alt) => ImageAlt::new(alt)?,
            None => return Err(ApplicationError::validation("image alt text is required")),
        };
        let reading_minutes = reading_minutes.map(ReadingMinutes::new).transpose()?;
        let category_id =
            resolve_category(self.category_repo.as_ref(), category_id, category.as_deref())
                .await?;

        let now = self.clock.now();
        let base = slug_base(
            self.slugger.as_ref(),
            slug.as_deref(),
            title.as_str(),
            "article",
            now,
        )?;

        let ingested = self
            .ingest_image(file, image.url.as_deref())
            .await?
            .ok_or_else(|| ApplicationError::validation("an image file or image url is required"))?;

        let draft = NewArticle {
            title,
            slug: Slug::new(base.clone())?,
            content,
            image: image_from_ingested(&ingested, alt),
            summary: summary.filter(|s| !s.trim().is_empty()),
            category_id,
            keywords: clean_keywords(keywords),
            reading_minutes,
            created_at: now,
            updated_at: now,
        };

        let index = ArticleSlugIndex::new(self.read_repo.as_ref(), None);
        let write_repo = self.write_repo.as_ref();
        let result = commit_with_retry(&base, &index, |candidate| {
            let mut attempt = draft.clone();
            async move {
                attempt.slug = Slug::new(candidate)?;
                write_repo.insert(attempt).await
            }
        })
        .await;

        match result {
            Ok(created) => {
                tracing::info!(article_id = created.id.0, slug = %created.slug, "article created");
                Ok(created.into())
            }
            Err(err) => {
                self.discard(Some(&ingested)).await;
                Err(err.into())
            }
        }
    }
}

pub(super) fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}
