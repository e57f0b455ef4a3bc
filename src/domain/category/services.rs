// src/domain/category/services.rs
use async_trait::async_trait;

use crate::domain::category::{CategoryId, CategoryRepository};
use crate::domain::errors::DomainResult;
use crate::domain::slug::{SlugIndex, collation_key};

/// Category slugs as seen by the resolver, optionally ignoring one record.
pub struct CategorySlugIndex<'a> {
    repo: &'a dyn CategoryRepository,
    exclude: Option<CategoryId>,
}

impl<'a> CategorySlugIndex<'a> {
    pub fn new(repo: &'a dyn CategoryRepository, exclude: Option<CategoryId>) -> Self {
        Self { repo, exclude }
    }
}

#[async_trait]
impl SlugIndex for CategorySlugIndex<'_> {
    async fn is_taken(&self, candidate: &str) -> DomainResult<bool> {
        self.repo
            .slug_taken(&collation_key(candidate), self.exclude)
            .await
    }
}
