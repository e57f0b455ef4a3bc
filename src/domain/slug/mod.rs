// src/domain/slug/mod.rs
//! Slug normalization and collection-unique slug resolution.
//!
//! Articles and categories derive their URL keys here. Uniqueness is checked
//! against a [`SlugIndex`] that compares under [`collation_key`], and the same
//! key is what the persistence layer guards with a unique index.

mod candidates;
mod collation;
mod normalize;
mod resolver;
mod value;

pub use candidates::CandidateSequence;
pub use collation::{collation_eq, collation_key};
pub use normalize::{normalize, squash_whitespace, transliterate};
pub use resolver::{
    MAX_CANDIDATES, MAX_COMMIT_ATTEMPTS, SlugIndex, commit_with_retry, resolve_unique,
};
pub use value::Slug;
