// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A commit lost the race for a slug: the unique key index rejected it.
    /// Callers re-run slug resolution instead of failing the request.
    #[error("slug already taken: {0}")]
    SlugTaken(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn is_slug_taken(&self) -> bool {
        matches!(self, Self::SlugTaken(_))
    }
}
