// src/domain/slug/value.rs
use std::fmt;

use super::normalize::normalize;
use crate::domain::errors::{DomainError, DomainResult};

const MIN_OVERRIDE_LEN: usize = 3;

/// A persisted slug: non-empty, lowercase ASCII letters, digits and dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::Validation(
                "slug may only contain lowercase letters, digits and dashes".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Validate a caller-supplied slug and return its normalized base.
    pub fn base_from_override(raw: &str) -> DomainResult<String> {
        let raw = raw.trim();
        if raw.chars().count() < MIN_OVERRIDE_LEN {
            return Err(DomainError::Validation(format!(
                "slug must be at least {MIN_OVERRIDE_LEN} characters"
            )));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::Validation(
                "slug may only contain lowercase letters, digits and dashes".into(),
            ));
        }
        let base = normalize(raw);
        if base.is_empty() {
            return Err(DomainError::Validation(
                "slug must contain at least one letter or digit".into(),
            ));
        }
        Ok(base)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normalized_values() {
        assert_eq!(Slug::new("ogut-sisir-2").unwrap().as_str(), "ogut-sisir-2");
    }

    #[test]
    fn rejects_empty_and_uppercase() {
        assert!(Slug::new("").is_err());
        assert!(Slug::new("Hello").is_err());
        assert!(Slug::new("a b").is_err());
    }

    #[test]
    fn override_is_normalized() {
        assert_eq!(Slug::base_from_override("--my--post-").unwrap(), "my-post");
    }

    #[test]
    fn override_rules() {
        assert!(Slug::base_from_override("ab").is_err());
        assert!(Slug::base_from_override("Has Spaces").is_err());
        assert!(Slug::base_from_override("----").is_err());
    }
}
