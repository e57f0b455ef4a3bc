// src/domain/contact/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};

const MIN_NAME_LEN: usize = 2;
const MIN_TITLE_LEN: usize = 2;
const MIN_CONTENT_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub i64);

impl ContactId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("contact id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub id: ContactId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A validated contact-form submission. Text fields are trimmed and blank
/// optional fields become `None`.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewContactMessage {
    pub fn new(
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        title: &str,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = required(name, "name", MIN_NAME_LEN)?;
        let title = required(title, "title", MIN_TITLE_LEN)?;
        let content = required(content, "content", MIN_CONTENT_LEN)?;
        let email = optional(email);
        if email.as_deref().is_some_and(|e| !looks_like_email(e)) {
            return Err(DomainError::Validation("email is not valid".into()));
        }
        Ok(Self {
            name,
            email,
            phone: optional(phone),
            title,
            content,
            created_at,
        })
    }
}

fn required(value: &str, field: &str, min: usize) -> DomainResult<String> {
    let value = value.trim();
    if value.chars().count() < min {
        return Err(DomainError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
