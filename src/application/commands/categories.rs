// src/application/commands/categories.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::slug_base,
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
        ports::{time::Clock, util::SlugGenerator},
    },
    domain::{
        article::ArticleReadRepository,
        category::{
            CategoryId, CategoryName, CategoryRepository, CategorySlugIndex, CategoryUpdate,
            NewCategory,
        },
        slug::{Slug, collation_key, commit_with_retry},
        video::VideoRepository,
    },
};

pub const CATEGORY_IN_ARTICLES: &str = "CATEGORY_IN_ARTICLES";
pub const CATEGORY_IN_VIDEOS: &str = "CATEGORY_IN_VIDEOS";

pub struct CreateCategoryCommand {
    pub name: String,
}

pub struct UpdateCategoryCommand {
    pub id: i64,
    pub name: String,
}

pub struct DeleteCategoryCommand {
    pub id: i64,
}

pub struct CategoryCommandService {
    repo: Arc<dyn CategoryRepository>,
    articles: Arc<dyn ArticleReadRepository>,
    videos: Arc<dyn VideoRepository>,
    slugger: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl CategoryCommandService {
    pub fn new(
        repo: Arc<dyn CategoryRepository>,
        articles: Arc<dyn ArticleReadRepository>,
        videos: Arc<dyn VideoRepository>,
        slugger: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            articles,
            videos,
            slugger,
            clock,
        }
    }

    pub async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let name = CategoryName::new(command.name)?;
        self.ensure_name_free(&name, None).await?;

        let now = self.clock.now();
        let base = slug_base(self.slugger.as_ref(), None, name.as_str(), "category", now)?;
        let index = CategorySlugIndex::new(self.repo.as_ref(), None);
        let repo = self.repo.as_ref();
        let draft = NewCategory {
            name,
            slug: Slug::new(base.clone())?,
            created_at: now,
            updated_at: now,
        };

        let created = commit_with_retry(&base, &index, |candidate| {
            let mut attempt = draft.clone();
            async move {
                attempt.slug = Slug::new(candidate)?;
                repo.insert(attempt).await
            }
        })
        .await?;

        tracing::info!(category_id = created.id.0, slug = %created.slug, "category created");
        Ok(created.into())
    }

    pub async fn update_category(
        &self,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = parse_id(command.id)?;
        let name = CategoryName::new(command.name)?;
        self.ensure_name_free(&name, Some(id)).await?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let now = self.clock.now();
        let draft = CategoryUpdate {
            id,
            name,
            slug: existing.slug.clone(),
            updated_at: now,
        };

        if draft.name == existing.name {
            return Ok(self.repo.update(draft).await?.into());
        }

        let base = slug_base(self.slugger.as_ref(), None, draft.name.as_str(), "category", now)?;
        let index = CategorySlugIndex::new(self.repo.as_ref(), Some(id));
        let repo = self.repo.as_ref();
        let draft = &draft;
        let updated = commit_with_retry(&base, &index, |candidate| {
            let mut attempt = draft.clone();
            async move {
                attempt.slug = Slug::new(candidate)?;
                repo.update(attempt).await
            }
        })
        .await?;

        Ok(updated.into())
    }

    /// Refuses while any article or video still points at the category.
    pub async fn delete_category(&self, command: DeleteCategoryCommand) -> ApplicationResult<()> {
        let id = parse_id(command.id)?;

        if self.articles.any_in_category(id).await? {
            return Err(ApplicationError::in_use(
                "category is used by one or more articles",
                CATEGORY_IN_ARTICLES,
            ));
        }
        if self.videos.any_in_category(id).await? {
            return Err(ApplicationError::in_use(
                "category is used by one or more videos",
                CATEGORY_IN_VIDEOS,
            ));
        }

        self.repo.delete(id).await?;
        tracing::info!(category_id = id.0, "category deleted");
        Ok(())
    }

    async fn ensure_name_free(
        &self,
        name: &CategoryName,
        exclude: Option<CategoryId>,
    ) -> ApplicationResult<()> {
        if self
            .repo
            .name_taken(&collation_key(name.as_str()), exclude)
            .await?
        {
            return Err(ApplicationError::conflict("a category with this name already exists"));
        }
        Ok(())
    }
}

fn parse_id(raw: i64) -> ApplicationResult<CategoryId> {
    CategoryId::new(raw).map_err(|_| ApplicationError::validation("invalid category id"))
}
