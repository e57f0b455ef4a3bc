use super::ArticleQueryService;
use crate::application::{
    dto::{ArticleDto, ListResponse},
    error::ApplicationResult,
};

impl ArticleQueryService {
    pub async fn list_articles(&self) -> ApplicationResult<ListResponse<ArticleDto>> {
        let records = self.read_repo.list().await?;
        Ok(records.into_iter().collect())
    }
}
