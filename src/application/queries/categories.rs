use std::sync::Arc;

use crate::{
    application::{
        dto::{CategoryDto, ListResponse},
        error::ApplicationResult,
    },
    domain::category::CategoryRepository,
};

pub struct CategoryQueryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryQueryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Sorted by name.
    pub async fn list_categories(&self) -> ApplicationResult<ListResponse<CategoryDto>> {
        Ok(self.repo.list().await?.into_iter().collect())
    }
}
