use crate::application::ports::util::SlugGenerator;
use crate::domain::slug::normalize;

/// Slugs with the Turkish transliteration table applied.
#[derive(Default, Clone)]
pub struct TurkishSlugGenerator;

impl SlugGenerator for TurkishSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        normalize(input)
    }
}
