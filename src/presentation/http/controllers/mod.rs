// src/presentation/http/controllers/mod.rs
pub mod articles;
pub mod auth;
pub mod categories;
pub mod contact;
pub mod health;
pub mod uploads;
pub mod videos;

use super::error::HttpResult;
use super::extractors::IdInput;

/// Blank strings from form inputs count as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an optional reference id; blank strings count as absent.
pub(crate) fn optional_id(input: Option<IdInput>, what: &str) -> HttpResult<Option<i64>> {
    match input {
        None => Ok(None),
        Some(IdInput::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(id) => id.parse(what).map(Some),
    }
}
