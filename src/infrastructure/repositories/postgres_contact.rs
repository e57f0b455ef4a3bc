// src/infrastructure/repositories/postgres_contact.rs
use super::map_sqlx;
use crate::domain::contact::{ContactId, ContactMessage, ContactRepository, NewContactMessage};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for ContactMessage {
    type Error = DomainError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(ContactMessage {
            id: ContactId::new(row.id)?,
            name: row.name,
            email: row.email,
            phone: row.phone,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn insert(&self, message: NewContactMessage) -> DomainResult<ContactMessage> {
        let row = sqlx::query_as::<_, ContactRow>(
            "INSERT INTO contact_messages (name, email, phone, title, content, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, name, email, phone, title, content, created_at",
        )
        .bind(&message.name)
        .bind(message.email.as_deref())
        .bind(message.phone.as_deref())
        .bind(&message.title)
        .bind(&message.content)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        ContactMessage::try_from(row)
    }

    async fn list(&self) -> DomainResult<Vec<ContactMessage>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, email, phone, title, content, created_at
             FROM contact_messages ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(ContactMessage::try_from).collect()
    }

    async fn find_by_id(&self, id: ContactId) -> DomainResult<Option<ContactMessage>> {
        let row = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, email, phone, title, content, created_at
             FROM contact_messages WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(ContactMessage::try_from).transpose()
    }

    async fn delete(&self, id: ContactId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("contact message not found".into()));
        }
        Ok(())
    }
}
