// src/domain/article/services.rs
use async_trait::async_trait;

use crate::domain::article::{ArticleId, ArticleReadRepository};
use crate::domain::errors::DomainResult;
use crate::domain::slug::{SlugIndex, collation_key};

/// Article slugs as seen by the resolver, optionally ignoring the article
/// being edited.
pub struct ArticleSlugIndex<'a> {
    read_repo: &'a dyn ArticleReadRepository,
    exclude: Option<ArticleId>,
}

impl<'a> ArticleSlugIndex<'a> {
    pub fn new(read_repo: &'a dyn ArticleReadRepository, exclude: Option<ArticleId>) -> Self {
        Self { read_repo, exclude }
    }
}

#[async_trait]
impl SlugIndex for ArticleSlugIndex<'_> {
    async fn is_taken(&self, candidate: &str) -> DomainResult<bool> {
        self.read_repo
            .slug_taken(&collation_key(candidate), self.exclude)
            .await
    }
}
