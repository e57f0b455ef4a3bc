// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Normalized slug base for `input`; may be empty.
    fn slugify(&self, input: &str) -> String;
}
