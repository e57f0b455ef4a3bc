// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{application::error::ApplicationResult, domain::article::ArticleId};

pub struct DeleteArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    pub async fn delete_article(&self, command: DeleteArticleCommand) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        let removed = self.write_repo.delete(id).await?;

        if let Some(public_id) = removed.image.public_id.as_deref() {
            self.images.release(public_id).await;
        }
        tracing::info!(article_id = id.0, slug = %removed.slug, "article deleted");
        Ok(())
    }
}
