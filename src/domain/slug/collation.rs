// src/domain/slug/collation.rs
use super::normalize::transliterate;

/// Comparison key for Turkish, case- and accent-insensitive equality.
///
/// Whitespace is trimmed and collapsed, Turkish letters go through the same
/// map as [`super::normalize`], remaining non-ASCII text is transliterated and
/// everything is lowercased. Persisted `*_key` columns hold this value.
pub fn collation_key(text: &str) -> String {
    let mapped: String = text
        .split_whitespace()
        .flat_map(|word| {
            std::iter::once(' ').chain(word.chars().map(|ch| transliterate(ch).unwrap_or(ch)))
        })
        .skip(1)
        .collect();

    deunicode::deunicode(&mapped).to_ascii_lowercase()
}

pub fn collation_eq(a: &str, b: &str) -> bool {
    collation_key(a) == collation_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turkish_i_variants_compare_equal() {
        assert_eq!(collation_key("İSTANBUL"), "istanbul");
        assert!(collation_eq("ISIK", "ışık"));
        assert!(collation_eq("İzmir", "izmir"));
    }

    #[test]
    fn accents_and_case_are_ignored() {
        assert!(collation_eq("Çay", "cay"));
        assert!(collation_eq("Crème Brûlée", "creme brulee"));
        assert!(!collation_eq("cay", "kay"));
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(collation_key("  Yazılım   Günlüğü "), "yazilim gunlugu");
    }

    #[test]
    fn normalized_slugs_are_their_own_key() {
        assert_eq!(collation_key("ogut-sisir-2"), "ogut-sisir-2");
    }
}
