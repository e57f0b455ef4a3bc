// src/domain/slug/resolver.rs
use std::future::Future;

use async_trait::async_trait;

use super::candidates::CandidateSequence;
use crate::domain::errors::{DomainError, DomainResult};

/// Upper bound on candidates tried before resolution is treated as an anomaly.
pub const MAX_CANDIDATES: usize = 1000;

/// Upper bound on commits attempted when the unique index keeps rejecting slugs.
pub const MAX_COMMIT_ATTEMPTS: usize = 5;

/// Existence check against one collection's slugs.
///
/// Implementations compare under [`super::collation_key`] and leave out the
/// record being updated, if any.
#[async_trait]
pub trait SlugIndex: Send + Sync {
    async fn is_taken(&self, candidate: &str) -> DomainResult<bool>;
}

/// Return the first candidate of `base`, `base-1`, `base-2`, ... that the index
/// reports as free.
///
/// Index failures propagate as-is and never count as "free".
pub async fn resolve_unique(base: &str, index: &dyn SlugIndex) -> DomainResult<String> {
    for (attempt, candidate) in CandidateSequence::new(base).take(MAX_CANDIDATES).enumerate() {
        if !index.is_taken(&candidate).await? {
            if attempt > 0 {
                tracing::debug!(base, slug = %candidate, collisions = attempt, "slug resolved after collisions");
            }
            return Ok(candidate);
        }
    }

    tracing::error!(
        base,
        attempts = MAX_CANDIDATES,
        "slug candidates exhausted; collision chain points at a data problem"
    );
    Err(DomainError::Conflict(format!(
        "no free slug found for '{base}' after {MAX_CANDIDATES} candidates"
    )))
}

/// Resolve a slug and hand it to `commit`, re-resolving whenever the commit
/// loses a race and comes back with [`DomainError::SlugTaken`].
///
/// Any other commit error is returned unchanged.
pub async fn commit_with_retry<T, F, Fut>(
    base: &str,
    index: &dyn SlugIndex,
    mut commit: F,
) -> DomainResult<T>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let mut last_err = None;

    for attempt in 1..=MAX_COMMIT_ATTEMPTS {
        let slug = resolve_unique(base, index).await?;
        match commit(slug.clone()).await {
            Err(err) if err.is_slug_taken() => {
                tracing::warn!(base, %slug, attempt, "slug claimed concurrently; resolving again");
                last_err = Some(err);
            }
            other => return other,
        }
    }

    let err = last_err.unwrap_or_else(|| DomainError::SlugTaken(base.to_string()));
    Err(DomainError::Conflict(format!(
        "could not commit a unique slug for '{base}': {err}"
    )))
}
