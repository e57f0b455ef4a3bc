use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::ArticleId;
use crate::domain::category::CategoryId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Fails with `DomainError::SlugTaken` when the slug key is already used.
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Applies only if the row still carries `original_updated_at`.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    /// Returns the removed article so its image can be released.
    async fn delete(&self, id: ArticleId) -> DomainResult<Article>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug_key(&self, slug_key: &str) -> DomainResult<Option<Article>>;
    /// Newest first.
    async fn list(&self) -> DomainResult<Vec<Article>>;
    async fn slug_taken(&self, slug_key: &str, exclude: Option<ArticleId>) -> DomainResult<bool>;
    async fn any_in_category(&self, category_id: CategoryId) -> DomainResult<bool>;
}
