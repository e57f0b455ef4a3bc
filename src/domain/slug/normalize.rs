// src/domain/slug/normalize.rs

/// Map a Turkish letter to its ASCII counterpart.
///
/// Generic Unicode case folding pairs `ı`/`I` and `i`/`İ` differently than
/// Turkish does, so these are mapped explicitly before any lowercasing.
pub fn transliterate(ch: char) -> Option<char> {
    let mapped = match ch {
        'ç' | 'Ç' => 'c',
        'ğ' | 'Ğ' => 'g',
        'ı' | 'I' | 'İ' => 'i',
        'ö' | 'Ö' => 'o',
        'ş' | 'Ş' => 's',
        'ü' | 'Ü' => 'u',
        _ => return None,
    };
    Some(mapped)
}

/// Trim and collapse inner whitespace runs to single spaces.
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn free-form text into a URL-safe slug base.
///
/// Runs of anything outside `[a-z0-9]` become a single `-` and edge dashes are
/// dropped. The result may be empty; rejecting that is up to the caller.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        let ch = transliterate(ch).unwrap_or(ch).to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out
}
