//! Canonical artist names and the "looks like an artist" filter

use regex::Regex;
use std::sync::LazyLock;

static LEADING_THE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^the\s+").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static POSSESSIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'s\b").expect("valid regex"));
static ABSTRACT_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(production|piece|work|admiration)\b.*$").expect("valid regex"));

static GENRE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(jazz|rock|roll|r&b|rhythm\s+and\s+blues|blues|folk|punk|metal|hip\s*hop|rap|",
        r"electronic|techno|house|disco|funk|soul|gospel|country|classical|ambient|industrial|",
        r"reggae|ska|grunge|new\s+wave|post[-\s]?punk|shoegaze|krautrock|avant[-\s]?garde)\b",
    ))
    .expect("valid regex")
});
static MOVEMENT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(music|scene|movement|genre|style|tradition)\b").expect("valid regex"));

const NAME_SYMBOLS: &[char] = &['.', '\'', '&', '/', '-'];

/// Canonical display form of a raw candidate name.
///
/// Strips a leading "The", collapses whitespace, drops possessive `'s`,
/// trailing punctuation and an abstract-noun tail ("work", "production",
/// "piece", "admiration" and whatever follows).
///
/// # Examples
///
/// ```
/// use tributary_extractor::canonical_artist_name;
///
/// assert_eq!(canonical_artist_name("The Beatles"), "Beatles");
/// assert_eq!(canonical_artist_name("Brian Eno's production work"), "Brian Eno");
/// assert_eq!(canonical_artist_name("Kraftwerk."), "Kraftwerk");
/// ```
pub fn canonical_artist_name(raw: &str) -> String {
    let name = LEADING_THE.replace(raw.trim(), "");
    let name = WHITESPACE.replace_all(name.trim(), " ");
    let name = POSSESSIVE.replace_all(&name, "");
    let name = name.trim_end_matches([' ', '.', ',', ':', ';', '"']);
    let name = name.strip_suffix(['’', '\'']).unwrap_or(name);
    ABSTRACT_TAIL.replace(name, "").trim().to_string()
}

/// Whether a canonical name is plausibly an artist rather than prose.
pub fn looks_like_artist_name(name: &str) -> bool {
    let name = name.trim();
    if name.chars().count() < 3 {
        return false;
    }

    let has_capital = name.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = name.chars().any(char::is_numeric);
    let has_symbol = name.contains(NAME_SYMBOLS);
    if !(has_capital || has_digit || has_symbol) {
        return false;
    }

    if !has_capital && (GENRE_WORD.is_match(name) || MOVEMENT_WORD.is_match(name)) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_article() {
        assert_eq!(canonical_artist_name("  the Velvet Underground "), "Velvet Underground");
        assert_eq!(canonical_artist_name("Theatre of Hate"), "Theatre of Hate");
    }

    #[test]
    fn test_strips_possessive_and_punctuation() {
        assert_eq!(canonical_artist_name("Bowie's"), "Bowie");
        assert_eq!(canonical_artist_name("Sonic  Youth;\""), "Sonic Youth");
        assert_eq!(canonical_artist_name("Kinks'"), "Kinks");
        assert_eq!(canonical_artist_name("Kinks’"), "Kinks");
    }

    #[test]
    fn test_strips_abstract_tail() {
        assert_eq!(canonical_artist_name("Phil Spector production techniques"), "Phil Spector");
        assert_eq!(canonical_artist_name("Stockhausen's admiration"), "Stockhausen");
        assert_eq!(canonical_artist_name("Works"), "Works");
    }

    #[test]
    fn test_looks_like_artist_accepts_names() {
        assert!(looks_like_artist_name("Radiohead"));
        assert!(looks_like_artist_name("blink-182"));
        assert!(looks_like_artist_name("will.i.am"));
        assert!(looks_like_artist_name("Punk Rock Band"));
    }

    #[test]
    fn test_looks_like_artist_rejects_prose() {
        assert!(!looks_like_artist_name("Ca"));
        assert!(!looks_like_artist_name("many others"));
        assert!(!looks_like_artist_name("post-punk"));
        assert!(!looks_like_artist_name("   "));
    }

    #[test]
    fn test_lowercase_symbol_without_genre_passes() {
        assert!(looks_like_artist_name("m.a.x"));
        assert!(!looks_like_artist_name("r&b"));
    }
}
