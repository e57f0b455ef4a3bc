// src/application/commands/contacts.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::ContactDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::contact::{ContactId, ContactRepository, NewContactMessage},
};

pub struct SubmitContactCommand {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: String,
    pub content: String,
}

pub struct ContactCommandService {
    repo: Arc<dyn ContactRepository>,
    clock: Arc<dyn Clock>,
}

impl ContactCommandService {
    pub fn new(repo: Arc<dyn ContactRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn submit(&self, command: SubmitContactCommand) -> ApplicationResult<ContactDto> {
        let message = NewContactMessage::new(
            &command.name,
            command.email.as_deref(),
            command.phone.as_deref(),
            &command.title,
            &command.content,
            self.clock.now(),
        )?;
        let stored = self.repo.insert(message).await?;
        tracing::info!(contact_id = stored.id.0, "contact message received");
        Ok(stored.into())
    }

    pub async fn delete(&self, id: i64) -> ApplicationResult<()> {
        let id = ContactId::new(id).map_err(|_| ApplicationError::validation("invalid id"))?;
        self.repo.delete(id).await?;
        Ok(())
    }
}
