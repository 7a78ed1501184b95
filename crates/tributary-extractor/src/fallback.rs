//! Deterministic fallback splitter for the text following a cue
//!
//! Used when the entity recognizer misses names. Works on the raw tail of
//! the sentence: cut the tail at the first clause boundary, then split the
//! remainder into list items and peel descriptive prefixes off each item.

use regex::Regex;
use std::sync::LazyLock;

const HARD_BOUNDARIES: &[&str] = &[" which ", " that ", " while "];
const SOFT_BOUNDARIES: &[&str] = &[", and ", " and ", ", but ", " but "];
const BARE_ARTICLES: &[&str] = &["the", "a", "an"];

static SUCH_AS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bsuch as \b").expect("valid regex"));
static LIST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i),|\band\b|&").expect("valid regex"));
static YEAR_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b.*$").expect("valid regex"));

static PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^(the\s+)?soundtracks of\s+",
        r"(?i)^(the\s+)?(?:sampling\s+)?work of\s+",
        r"^\d{4}s\s+",
        r"(?i)^(rock|pop|jazz|blues|folk|punk|metal|electronic)\s+groups?\s+",
        r"(?i)^(jazz|rock|pop|classical|electronic)\s+musician\s+",
        r"(?i)^\w+\s+musician\s+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid prefix pattern"))
    .collect()
});

static LEAD_INS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^(?:spinning|playing)\s+(?:the\s+)?likes\s+of\s+",
        r"(?i)^(?:including|such\s+as)\s+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid lead-in pattern"))
    .collect()
});

/// Cut a cue tail at the first clause boundary.
///
/// " which ", " that " and " while " always cut. " and " and " but " (with
/// or without a leading comma) only cut when the next word starts
/// lowercase, so "Can and Neu!" survives but "Can and later toured" does not.
pub fn truncate_tail(text: &str) -> &str {
    let text = text.trim();
    // ASCII lowercasing keeps byte offsets aligned with `text`
    let lower = text.to_ascii_lowercase();
    let mut cut = text.len();

    for marker in HARD_BOUNDARIES {
        if let Some(at) = lower.find(marker) {
            cut = cut.min(at);
        }
    }

    for marker in SOFT_BOUNDARIES {
        let lowercase_follows = |at: usize| {
            text[at + marker.len()..]
                .trim_start()
                .chars()
                .next()
                .is_some_and(char::is_lowercase)
        };
        if let Some((at, _)) = lower.match_indices(marker).find(|(at, _)| lowercase_follows(*at)) {
            cut = cut.min(at);
        }
    }

    text[..cut].trim()
}

/// Split a (truncated) cue tail into raw candidate names.
///
/// # Examples
///
/// ```
/// use tributary_extractor::split_fallback;
///
/// assert_eq!(
///     split_fallback("bands such as Can, Neu! and Faust."),
///     vec!["Can", "Neu!", "Faust"],
/// );
/// ```
pub fn split_fallback(text: &str) -> Vec<String> {
    let mut rest = text.trim().trim_matches(['.', ';', ':', '(', ')', '[', ']']);
    if let Some(m) = SUCH_AS.find(rest) {
        rest = &rest[m.end()..];
    }
    if rest.trim().is_empty() {
        return Vec::new();
    }

    let mut names: Vec<String> = Vec::new();
    for part in LIST_SEPARATOR.split(rest) {
        let Some(name) = clean_part(part) else {
            continue;
        };
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn clean_part(part: &str) -> Option<String> {
    let mut part = part.trim().to_string();

    for prefix in PREFIXES.iter() {
        part = prefix.replace(&part, "").into_owned();
    }
    part = YEAR_TAIL.replace(&part, "").trim().to_string();
    for lead_in in LEAD_INS.iter() {
        part = lead_in.replace(&part, "").into_owned();
    }

    let part = part.split('"').next().unwrap_or_default().trim();
    let lowered = part.to_lowercase();
    if part.chars().count() < 2 || BARE_ARTICLES.contains(&lowered.as_str()) {
        return None;
    }
    Some(part.to_string())
}
