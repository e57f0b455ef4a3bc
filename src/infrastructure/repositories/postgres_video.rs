// src/infrastructure/repositories/postgres_video.rs
use super::map_sqlx;
use crate::domain::category::{CategoryId, CategoryRef};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::video::{
    NewVideo, Video, VideoCover, VideoId, VideoRepository, VideoTitle, VideoUpdate, YoutubeId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const VIDEO_COLUMNS: &str = "v.id, v.title, v.youtube_id, v.cover_url, v.cover_public_id, \
     v.category_id, c.name AS category_name, v.created_at, v.updated_at";

#[derive(Clone)]
pub struct PostgresVideoRepository {
    pool: PgPool,
}

impl PostgresVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by_id(&self, id: i64) -> DomainResult<Option<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos v LEFT JOIN categories c ON c.id = v.category_id
             WHERE v.id = $1"
        );
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Video::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct VideoRow {
    id: i64,
    title: String,
    youtube_id: String,
    cover_url: String,
    cover_public_id: String,
    category_id: Option<i64>,
    category_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VideoRow> for Video {
    type Error = DomainError;

    fn try_from(row: VideoRow) -> Result<Self, Self::Error> {
        let category = row
            .category_id
            .map(|id| -> DomainResult<CategoryRef> {
                Ok(CategoryRef {
                    id: CategoryId::new(id)?,
                    name: row.category_name.clone().unwrap_or_default(),
                })
            })
            .transpose()?;

        Ok(Video {
            id: VideoId::new(row.id)?,
            title: VideoTitle::new(row.title)?,
            youtube_id: YoutubeId::new(row.youtube_id)?,
            cover: VideoCover {
                url: row.cover_url,
                public_id: row.cover_public_id,
            },
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl VideoRepository for PostgresVideoRepository {
    async fn list(&self) -> DomainResult<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos v LEFT JOIN categories c ON c.id = v.category_id
             ORDER BY v.created_at DESC, v.id DESC"
        );
        let rows = sqlx::query_as::<_, VideoRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(Video::try_from).collect()
    }

    async fn find_by_id(&self, id: VideoId) -> DomainResult<Option<Video>> {
        self.fetch_one_by_id(i64::from(id)).await
    }

    async fn insert(&self, video: NewVideo) -> DomainResult<Video> {
        let NewVideo {
            title,
            youtube_id,
            cover,
            category_id,
            created_at,
            updated_at,
        } = video;

        let sql = format!(
            "WITH v AS (
                INSERT INTO videos (title, youtube_id, cover_url, cover_public_id, category_id,
                    created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
             )
             SELECT {VIDEO_COLUMNS} FROM v LEFT JOIN categories c ON c.id = v.category_id"
        );
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(title.as_str())
            .bind(youtube_id.as_str())
            .bind(&cover.url)
            .bind(&cover.public_id)
            .bind(category_id.map(i64::from))
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Video::try_from(row)
    }

    async fn update(&self, update: VideoUpdate) -> DomainResult<Video> {
        let VideoUpdate {
            id,
            title,
            youtube_id,
            cover,
            category_id,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("WITH v AS (UPDATE videos SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.as_str().to_string());
        }
        if let Some(youtube_id) = youtube_id {
            builder.push(", youtube_id = ");
            builder.push_bind(youtube_id.as_str().to_string());
        }
        if let Some(cover) = cover {
            builder.push(", cover_url = ");
            builder.push_bind(cover.url);
            builder.push(", cover_public_id = ");
            builder.push_bind(cover.public_id);
        }
        if let Some(category_id) = category_id {
            builder.push(", category_id = ");
            builder.push_bind(category_id.map(i64::from));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING *) SELECT ");
        builder.push(VIDEO_COLUMNS);
        builder.push(" FROM v LEFT JOIN categories c ON c.id = v.category_id");

        let row = builder
            .build_query_as::<VideoRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("video not found".into()))?;

        Video::try_from(row)
    }

    async fn delete(&self, id: VideoId) -> DomainResult<Video> {
        let sql = format!(
            "WITH v AS (DELETE FROM videos WHERE id = $1 RETURNING *)
             SELECT {VIDEO_COLUMNS} FROM v LEFT JOIN categories c ON c.id = v.category_id"
        );
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("video not found".into()))?;
        Video::try_from(row)
    }

    async fn any_in_category(&self, category_id: CategoryId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM videos WHERE category_id = $1)")
            .bind(i64::from(category_id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
