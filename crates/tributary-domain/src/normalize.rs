//! Deterministic text normalization shared by every component

/// Normalize text for literal name matching.
///
/// Lowercases, replaces every run of characters outside `[a-z0-9]` with a
/// single space, and trims. Non-ASCII letters count as separators.
///
/// # Examples
///
/// ```
/// use tributary_domain::normalize_text;
///
/// assert_eq!(normalize_text("  The Beatles!! "), "the beatles");
/// assert_eq!(normalize_text("AC/DC"), "ac dc");
/// assert_eq!(normalize_text("---"), "");
/// ```
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Split text into normalized tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a cache key: lowercase and collapse whitespace.
///
/// Unlike [`normalize_text`], punctuation is preserved, so `"AC/DC"` and
/// `"AC DC"` are distinct keys.
pub fn normalize_key(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_punctuation_runs() {
        assert_eq!(normalize_text("Guns N' Roses"), "guns n roses");
        assert_eq!(normalize_text("Earth, Wind & Fire"), "earth wind fire");
    }

    #[test]
    fn test_normalize_non_ascii_is_separator() {
        assert_eq!(normalize_text("Björk"), "bj rk");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("The Velvet Underground."), vec!["the", "velvet", "underground"]);
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn test_normalize_key_keeps_punctuation() {
        assert_eq!(normalize_key("  AC/DC   Live "), "ac/dc live");
        assert_ne!(normalize_key("AC/DC"), normalize_key("AC DC"));
    }
}
