use std::sync::Arc;

use crate::{
    application::{
        dto::{ContactDto, ListResponse},
        error::{ApplicationError, ApplicationResult},
    },
    domain::contact::{ContactId, ContactRepository},
};

pub struct ContactQueryService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactQueryService {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_messages(&self) -> ApplicationResult<ListResponse<ContactDto>> {
        Ok(self.repo.list().await?.into_iter().collect())
    }

    pub async fn get_message(&self, id: i64) -> ApplicationResult<ContactDto> {
        let id = ContactId::new(id).map_err(|_| ApplicationError::validation("invalid id"))?;
        self.repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("contact message not found"))
    }
}
