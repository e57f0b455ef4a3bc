pub mod articles;
pub mod auth;
pub mod categories;
pub mod contacts;
pub mod uploads;
pub mod videos;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::util::SlugGenerator,
    },
    domain::{
        category::{CategoryId, CategoryRepository},
        slug::{Slug, collation_key},
    },
};

/// A file received alongside a request.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Pick the slug base for a record: a validated override when one is given,
/// otherwise the normalized display text, falling back to
/// `<entity>-<unix seconds>` when that normalizes to nothing.
pub(crate) fn slug_base(
    slugger: &dyn SlugGenerator,
    override_slug: Option<&str>,
    display_text: &str,
    entity: &str,
    now: DateTime<Utc>,
) -> ApplicationResult<String> {
    if let Some(raw) = override_slug {
        return Ok(Slug::base_from_override(raw)?);
    }
    let base = slugger.slugify(display_text);
    if base.is_empty() {
        tracing::debug!(entity, "display text has no sluggable characters; using timestamp");
        return Ok(format!("{entity}-{}", now.timestamp()));
    }
    Ok(base)
}

/// Resolve a category reference given either by id or by name. The id wins
/// when both are present; names are matched under collation.
pub(crate) async fn resolve_category(
    repo: &dyn CategoryRepository,
    id: Option<i64>,
    name: Option<&str>,
) -> ApplicationResult<Option<CategoryId>> {
    if let Some(raw) = id {
        let id = CategoryId::new(raw)
            .map_err(|_| ApplicationError::validation("invalid category id"))?;
        return match repo.find_by_id(id).await? {
            Some(category) => Ok(Some(category.id)),
            None => Err(ApplicationError::not_found("category not found")),
        };
    }

    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => repo
            .find_by_name_key(&collation_key(name))
            .await?
            .map(|category| Some(category.id))
            .ok_or_else(|| ApplicationError::not_found("category not found")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Turkish;

    impl SlugGenerator for Turkish {
        fn slugify(&self, input: &str) -> String {
            crate::domain::slug::normalize(input)
        }
    }

    #[test]
    fn override_takes_precedence() {
        let now = Utc::now();
        let base = slug_base(&Turkish, Some("my-post"), "Başka Başlık", "article", now).unwrap();
        assert_eq!(base, "my-post");
    }

    #[test]
    fn bad_override_is_a_validation_error() {
        let err = slug_base(&Turkish, Some("!!"), "Title", "article", Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(crate::domain::errors::DomainError::Validation(_))
        ));
    }

    #[test]
    fn empty_title_slug_falls_back_to_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let base = slug_base(&Turkish, None, "!!!", "article", now).unwrap();
        assert_eq!(base, format!("article-{}", now.timestamp()));
    }
}
