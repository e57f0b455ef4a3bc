use crate::domain::article::{Article, ArticleImage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CategoryRefDto, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleImageDto {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiny_url: Option<String>,
}

impl From<ArticleImage> for ArticleImageDto {
    fn from(image: ArticleImage) -> Self {
        Self {
            url: image.url,
            alt: Some(image.alt.as_str().to_string()),
            tiny_url: image.tiny_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub image: ArticleImageDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRefDto>,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_minutes: Option<i32>,
    /// Creation time; the site shows it as the publish date.
    #[serde(with = "serde_time")]
    pub published_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into(),
            slug: article.slug.into(),
            content: article.content.into(),
            image: article.image.into(),
            summary: article.summary,
            category: article.category.map(Into::into),
            keywords: article.keywords,
            reading_minutes: article.reading_minutes.map(|m| m.get()),
            published_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Response of the image-only article update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageOnlyDto {
    pub image: ArticleImageDto,
}
