use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Characters `escape` keeps by default besides alphanumerics.
pub const DEFAULT_KEEP: &[char] = &['_', '-', ' ', '.'];

/// Drop every character that is neither alphanumeric nor in `keep`, then
/// trim trailing whitespace.
pub fn escape(text: &str, keep: &[char]) -> String {
    let escaped = text
        .chars()
        .filter(|c| c.is_alphanumeric() || keep.contains(c))
        .collect::<String>();

    escaped.trim_end().to_string()
}

/// Canonical form used for title matching: lowercase, no diacritics,
/// alphanumerics only.
pub fn normalize(text: &str) -> String {
    let folded = text
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>();

    escape(&folded, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_keeps_safe_characters() {
        assert_eq!(escape("AC/DC: Back in Black!", DEFAULT_KEEP), "ACDC Back in Black");
        assert_eq!(escape("file_name-1.mp3  ", DEFAULT_KEEP), "file_name-1.mp3");
        assert_eq!(escape("a b", &[]), "ab");
    }

    #[test]
    fn normalize_folds_case_and_accents() {
        assert_eq!(normalize("Beyoncé - Déjà Vu"), "beyoncedejavu");
        assert_eq!(normalize("The Beatles"), "thebeatles");
        assert_eq!(normalize("¡Ñandú!"), "nandu");
        assert_eq!(normalize("  "), "");
    }
}
