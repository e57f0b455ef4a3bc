use crate::domain::category::entity::{Category, CategoryUpdate, NewCategory};
use crate::domain::category::value_objects::CategoryId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Name and slug lookups take collation keys, not raw text.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Category>>;
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;
    async fn find_by_name_key(&self, name_key: &str) -> DomainResult<Option<Category>>;
    async fn name_taken(&self, name_key: &str, exclude: Option<CategoryId>) -> DomainResult<bool>;
    async fn slug_taken(&self, slug_key: &str, exclude: Option<CategoryId>) -> DomainResult<bool>;
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category>;
    async fn delete(&self, id: CategoryId) -> DomainResult<()>;
}
