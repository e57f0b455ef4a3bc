use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::collation_key,
};

pub struct GetArticleBySlugQuery {
    pub slug: String,
}

impl ArticleQueryService {
    /// Slugs match under collation, so `Istanbul-Gezisi` finds
    /// `istanbul-gezisi`.
    pub async fn get_article_by_slug(
        &self,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        let key = collation_key(&query.slug);
        if key.is_empty() {
            return Err(ApplicationError::not_found("article not found"));
        }
        let article = self
            .read_repo
            .find_by_slug_key(&key)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        Ok(article.into())
    }
}
