use crate::domain::contact::entity::{ContactId, ContactMessage, NewContactMessage};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(&self, message: NewContactMessage) -> DomainResult<ContactMessage>;
    /// Newest first.
    async fn list(&self) -> DomainResult<Vec<ContactMessage>>;
    async fn find_by_id(&self, id: ContactId) -> DomainResult<Option<ContactMessage>>;
    async fn delete(&self, id: ContactId) -> DomainResult<()>;
}
