// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleContent, ArticleId, ArticleTitle, ImageAlt, ReadingMinutes,
};
use crate::domain::category::{CategoryId, CategoryRef};
use crate::domain::slug::Slug;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleImage {
    pub url: String,
    pub alt: ImageAlt,
    pub tiny_url: Option<String>,
    pub public_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: Slug,
    pub content: ArticleContent,
    pub image: ArticleImage,
    pub summary: Option<String>,
    pub category: Option<CategoryRef>,
    pub keywords: Vec<String>,
    pub reading_minutes: Option<ReadingMinutes>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: Slug,
    pub content: ArticleContent,
    pub image: ArticleImage,
    pub summary: Option<String>,
    pub category_id: Option<CategoryId>,
    pub keywords: Vec<String>,
    pub reading_minutes: Option<ReadingMinutes>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update. `None` leaves a column alone; the nested options on
/// `summary` and `reading_minutes` distinguish "clear" from "keep".
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub slug: Option<Slug>,
    pub content: Option<ArticleContent>,
    pub image: Option<ArticleImage>,
    pub summary: Option<Option<String>>,
    pub category_id: Option<CategoryId>,
    pub keywords: Option<Vec<String>>,
    pub reading_minutes: Option<Option<ReadingMinutes>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            content: None,
            image: None,
            summary: None,
            category_id: None,
            keywords: None,
            reading_minutes: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_content(mut self, content: ArticleContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_image(mut self, image: ArticleImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    pub fn with_reading_minutes(mut self, minutes: Option<ReadingMinutes>) -> Self {
        self.reading_minutes = Some(minutes);
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.content.is_none()
            && self.image.is_none()
            && self.summary.is_none()
            && self.category_id.is_none()
            && self.keywords.is_none()
            && self.reading_minutes.is_none()
    }
}
