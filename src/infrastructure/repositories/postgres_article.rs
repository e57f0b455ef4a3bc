// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleContent, ArticleId, ArticleImage, ArticleReadRepository, ArticleTitle,
    ArticleUpdate, ArticleWriteRepository, ImageAlt, NewArticle, ReadingMinutes,
};
use crate::domain::category::{CategoryId, CategoryRef};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{Slug, collation_key};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// Column list of the joined article projection; `a` is the article row.
const ARTICLE_COLUMNS: &str = "a.id, a.title, a.slug, a.content, a.image_url, a.image_alt, \
     a.image_tiny_url, a.image_public_id, a.summary, a.category_id, c.name AS category_name, \
     a.keywords, a.reading_minutes, a.created_at, a.updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    content: String,
    image_url: String,
    image_alt: String,
    image_tiny_url: Option<String>,
    image_public_id: Option<String>,
    summary: Option<String>,
    category_id: Option<i64>,
    category_name: Option<String>,
    keywords: Vec<String>,
    reading_minutes: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let category = match row.category_id {
            Some(id) => Some(CategoryRef {
                id: CategoryId::new(id)?,
                name: row.category_name.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: Slug::new(row.slug)?,
            content: ArticleContent::new(row.content)?,
            image: ArticleImage {
                url: row.image_url,
                alt: ImageAlt::new(row.image_alt)?,
                tiny_url: row.image_tiny_url,
                public_id: row.image_public_id,
            },
            summary: row.summary,
            category,
            keywords: row.keywords,
            reading_minutes: row.reading_minutes.map(ReadingMinutes::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            content,
            image,
            summary,
            category_id,
            keywords,
            reading_minutes,
            created_at,
            updated_at,
        } = article;

        let sql = format!(
            "WITH a AS (
                INSERT INTO articles (title, slug, slug_key, content, image_url, image_alt,
                    image_tiny_url, image_public_id, summary, category_id, keywords,
                    reading_minutes, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                RETURNING *
             )
             SELECT {ARTICLE_COLUMNS} FROM a LEFT JOIN categories c ON c.id = a.category_id"
        );

        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(title.as_str())
            .bind(slug.as_str())
            .bind(collation_key(slug.as_str()))
            .bind(content.as_str())
            .bind(&image.url)
            .bind(image.alt.as_str())
            .bind(image.tiny_url.as_deref())
            .bind(image.public_id.as_deref())
            .bind(summary.as_deref())
            .bind(category_id.map(i64::from))
            .bind(&keywords)
            .bind(reading_minutes.map(ReadingMinutes::get))
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            slug,
            content,
            image,
            summary,
            category_id,
            keywords,
            reading_minutes,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("WITH a AS (UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            let title_str: String = title.into();
            builder.push(", title = ");
            builder.push_bind(title_str);
        }

        if let Some(slug) = slug {
            builder.push(", slug_key = ");
            builder.push_bind(collation_key(slug.as_str()));
            let slug_str: String = slug.into();
            builder.push(", slug = ");
            builder.push_bind(slug_str);
        }

        if let Some(content) = content {
            let content_str: String = content.into();
            builder.push(", content = ");
            builder.push_bind(content_str);
        }

        if let Some(image) = image {
            builder.push(", image_url = ");
            builder.push_bind(image.url);
            builder.push(", image_alt = ");
            builder.push_bind(image.alt.as_str().to_string());
            builder.push(", image_tiny_url = ");
            builder.push_bind(image.tiny_url);
            builder.push(", image_public_id = ");
            builder.push_bind(image.public_id);
        }

        if let Some(summary) = summary {
            builder.push(", summary = ");
            builder.push_bind(summary);
        }

        if let Some(category_id) = category_id {
            builder.push(", category_id = ");
            builder.push_bind(i64::from(category_id));
        }

        if let Some(keywords) = keywords {
            builder.push(", keywords = ");
            builder.push_bind(keywords);
        }

        if let Some(minutes) = reading_minutes {
            builder.push(", reading_minutes = ");
            builder.push_bind(minutes.map(ReadingMinutes::get));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" RETURNING *) SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(" FROM a LEFT JOIN categories c ON c.id = a.category_id");

        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row
            .ok_or_else(|| DomainError::Conflict("article update conflict, please retry".into()))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<Article> {
        let sql = format!(
            "WITH a AS (DELETE FROM articles WHERE id = $1 RETURNING *)
             SELECT {ARTICLE_COLUMNS} FROM a LEFT JOIN categories c ON c.id = a.category_id"
        );
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        Article::try_from(row)
    }
}

impl PostgresArticleReadRepository {
    fn select() -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(" FROM articles a LEFT JOIN categories c ON c.id = a.category_id");
        builder
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let mut builder = Self::select();
        builder.push(" WHERE a.id = ");
        builder.push_bind(i64::from(id));
        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug_key(&self, slug_key: &str) -> DomainResult<Option<Article>> {
        let mut builder = Self::select();
        builder.push(" WHERE a.slug_key = ");
        builder.push_bind(slug_key.to_string());
        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Article::try_from).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Article>> {
        let mut builder = Self::select();
        builder.push(" ORDER BY a.created_at DESC, a.id DESC");
        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(Article::try_from).collect()
    }

    async fn slug_taken(&self, slug_key: &str, exclude: Option<ArticleId>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM articles WHERE slug_key = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug_key)
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn any_in_category(&self, category_id: CategoryId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM articles WHERE category_id = $1)",
        )
        .bind(i64::from(category_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}
