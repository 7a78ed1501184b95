//! Influence cue patterns and reverse-direction detection
//!
//! The cue table is scanned in order and the first pattern that matches a
//! sentence wins, so direct cues take precedence over strong ones and
//! strong over weak.

use regex::Regex;
use std::sync::LazyLock;
use tributary_domain::PatternType;

/// Which entities a cue makes eligible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Only entities starting at or after the end of the cue
    After,
    /// Entities inside the cue span, or starting after it
    Any,
}

impl Direction {
    /// Whether an entity span is eligible for a cue span
    pub fn admits(&self, entity: (usize, usize), cue: (usize, usize)) -> bool {
        let (ent_start, ent_end) = entity;
        let (cue_start, cue_end) = cue;
        match self {
            Direction::After => ent_start >= cue_end,
            Direction::Any => (cue_start <= ent_start && ent_end <= cue_end) || ent_start >= cue_end,
        }
    }
}

#[derive(Debug)]
enum Guard {
    /// Reject when the text before the match ends with this pattern
    NotPrecededBy(Regex),
    /// Reject when the text from the match start begins with this pattern
    NotStartingWith(Regex),
}

/// One row of the cue table
#[derive(Debug)]
pub struct CuePattern {
    /// Cue strength
    pub strength: PatternType,
    /// Entity eligibility
    pub direction: Direction,
    /// Whether the fallback splitter may run on the text after the cue
    pub allows_fallback: bool,
    regex: Regex,
    guard: Option<Guard>,
}

/// A cue found in a sentence
#[derive(Debug, Clone, Copy)]
pub struct CueMatch {
    /// The matching table row
    pub pattern: &'static CuePattern,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

impl CuePattern {
    fn new(strength: PatternType, direction: Direction, pattern: &str) -> Self {
        Self {
            strength,
            direction,
            allows_fallback: strength != PatternType::Weak,
            regex: Regex::new(pattern).expect("valid cue pattern"),
            guard: None,
        }
    }

    fn without_fallback(mut self) -> Self {
        self.allows_fallback = false;
        self
    }

    fn guarded(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Source of the compiled pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn accepts(&self, sentence: &str, start: usize) -> bool {
        match &self.guard {
            None => true,
            Some(Guard::NotPrecededBy(re)) => !re.is_match(&sentence[..start]),
            Some(Guard::NotStartingWith(re)) => !re.is_match(&sentence[start..]),
        }
    }

    /// Leftmost accepted match in `sentence`
    pub fn find(&self, sentence: &str) -> Option<(usize, usize)> {
        let mut from = 0;
        while from <= sentence.len() {
            let m = self.regex.find_at(sentence, from)?;
            if self.accepts(sentence, m.start()) {
                return Some((m.start(), m.end()));
            }
            from = m.start() + sentence[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }
}

fn guard_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid guard pattern")
}

static CUE_TABLE: LazyLock<Vec<CuePattern>> = LazyLock::new(|| {
    use Direction::{After, Any};
    use PatternType::{Direct, Strong, Weak};

    vec![
        CuePattern::new(Direct, Any, r"(?i)\b(?:really\s+)?influenced\s+(?:me|us|my|our)\b"),
        CuePattern::new(Direct, Any, r"(?i)\b(?:was|were)\s+(?:a\s+)?(?:huge|big|major|massive)\s+influence\b"),
        CuePattern::new(Direct, Any, r"(?i)\b(?:one\s+of\s+)?(?:my|our)\s+(?:biggest|main|primary)\s+influences?\b"),
        CuePattern::new(Direct, After, r"(?i)\b(?:take|took|taking)\s+(?:a\s+)?lot\s+from\b"),
        // "heavily influenced by" is a strong cue further down
        CuePattern::new(Direct, After, r"(?i)\b(influenced\s+by)\b")
            .guarded(Guard::NotPrecededBy(guard_regex(r"(?i)\bheavily\s+$"))),
        CuePattern::new(
            Direct,
            After,
            r"(?i)\b(?:cited|cite|cites|named|list(?:ed)?)\s+(?:as\s+)?(?:his|her|their|its)\s+influences?\b|\b(?:cited|cite|cites)\b.*?\bas\s+(?:an?\s+)?influences?\b",
        )
        .guarded(Guard::NotStartingWith(guard_regex(
            r"(?i)^(?:cited|cite|cites)\s+(?:as\s+)?(?:an?\s+)?influence\s+by",
        ))),
        CuePattern::new(
            Direct,
            Any,
            r"(?i)\b(named|listed)\b.*?\b(?:his|her|their)?\s*(?:biggest|primary|main)?\s*\w*\s*influences?\b",
        ),
        CuePattern::new(Direct, Any, r"(?i)\b(named|listed)\b.*?\bas an influence\b"),
        CuePattern::new(Direct, After, r"(?i)\b(influences?\s+(include|have included)|other influences include)\b"),
        CuePattern::new(Strong, After, r"(?i)\b(inspired\s+by)\b"),
        CuePattern::new(Strong, After, r"(?i)\bgrew\s+up\s+listening\s+to\b"),
        CuePattern::new(Strong, After, r"(?i)\b(draws?|drawing)\s+inspiration\s+from\b"),
        CuePattern::new(Strong, After, r"(?i)\b(?:music|artists|bands|acts)\s+like\b").without_fallback(),
        CuePattern::new(Strong, After, r"(?i)\b(?:spinning|playing)\s+(?:the\s+)?likes\s+of\b"),
        CuePattern::new(Strong, After, r"(?i)\b(heavily\s+influenced\s+by)\b"),
        CuePattern::new(Strong, After, r"(?i)\b(?:was|were|is|are)\s+influenced\s+by\b"),
        CuePattern::new(Strong, After, r"(?i)\b(?:drew|draws|drawing)\s+(?:heavily\s+)?(?:from|on)\b"),
        CuePattern::new(Strong, After, r"(?i)\b(?:took|takes|taking)\s+(?:influence|influences)\s+from\b"),
        CuePattern::new(Strong, After, r"(?i)\b(?:influences?|inspiration)\s+(?:range|ranged)\s+from\b"),
        CuePattern::new(Strong, After, r"(?i)\bthe\s+influence\s+of\b"),
        CuePattern::new(Strong, After, r"(?i)\b(?:was|were|is|are)\s+inspired\s+by\s+the\s+work\s+of\b"),
        CuePattern::new(Strong, After, r"(?i)\bwith\s+influence\s+from\b"),
        CuePattern::new(Strong, After, r"(?i)\bwith\s+influence\s+from\s+artists?\s+such\s+as\b"),
        CuePattern::new(Strong, After, r"(?i)\binfluenced\s+(?:prominently|notably|largely|mainly|partly)\s+by\b"),
        CuePattern::new(Strong, After, r"(?i)\b(?:was|were|is|are)\s+influenced\s+by\s+bands?\s+such\s+as\b"),
        CuePattern::new(Strong, After, r"(?i)\b(?:was|were|is|are)\s+influenced\s+by\s+artists?\s+such\s+as\b"),
        CuePattern::new(Strong, Any, r"(?i)\b(?:a|an)\s+[^.]{0,120}?\b(?:ripoff|clone|knockoff)\b"),
        CuePattern::new(
            Weak,
            After,
            r"(?i)\b(?:people|they|critics)\s+(?:compare|compared)\s+(?:me|us|our\s+music|the\s+band)\s+to\b",
        ),
        CuePattern::new(Weak, After, r"(?i)\breminds?\s+me\s+of\b"),
        CuePattern::new(Weak, After, r"(?i)\b(compared\s+to)\b"),
        CuePattern::new(Weak, After, r"(?i)\b(reminiscent\s+of)\b"),
        CuePattern::new(Weak, After, r"(?i)\b(in\s+the\s+style\s+of)\b"),
        CuePattern::new(Weak, After, r"(?i)\b(sounds?\s+like)\b"),
    ]
});

static REVERSE_INFLUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:have|has|had)\s+been\s+cited\s+as\s+(?:an?\s+)?influence\s+by\b",
        r"|\b(?:is|are|was|were)\s+cited\s+as\s+(?:an?\s+)?influence\s+by\b",
        r"|\b(?:have|has|had)\s+cited\b.*?\bas\s+(?:an?\s+)?influence\b",
        r"|\bcited\b.*?\bas\s+(?:an?\s+)?influence\b",
        r"|\b(?:have|has)\s+influenced\s+(?:countless|many|numerous|a\s+number\s+of)\b",
        r"|\b(?:is|are|was|were)\s+(?:highly|hugely|widely)\s+influential\b",
    ))
    .expect("valid reverse-influence pattern")
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// The ordered cue table
pub fn cue_patterns() -> &'static [CuePattern] {
    &CUE_TABLE
}

/// First cue in table order that matches the sentence
pub fn find_cue(sentence: &str) -> Option<CueMatch> {
    cue_patterns().iter().find_map(|pattern| {
        pattern
            .find(sentence)
            .map(|(start, end)| CueMatch { pattern, start, end })
    })
}

/// Sentence says something else was influenced by the subject of the sentence
pub fn is_reverse_influence(sentence: &str) -> bool {
    REVERSE_INFLUENCE.is_match(sentence)
}

fn norm_simple(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_lowercase()
}

/// Sentence says something was influenced by `subject`
pub fn mentions_subject_as_influence(sentence: &str, subject: &str) -> bool {
    let subject = norm_simple(subject);
    if subject.is_empty() {
        return false;
    }
    let sentence = norm_simple(sentence).replace('’', "'");
    sentence.contains(&format!("influenced by {}", subject))
        || sentence.contains(&format!("influenced by the {}", subject))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(sentence: &str) -> Option<(PatternType, &str)> {
        find_cue(sentence).map(|m| (m.pattern.strength, &sentence[m.start..m.end]))
    }

    #[test]
    fn test_heavily_influenced_by_is_strong() {
        let (strength, text) = cue("He said the band was heavily influenced by The Beatles and Radiohead.").unwrap();
        assert_eq!(strength, PatternType::Strong);
        assert_eq!(text, "heavily influenced by");
    }

    #[test]
    fn test_plain_influenced_by_is_direct() {
        let (strength, text) = cue("Early on they were influenced by Can.").unwrap();
        assert_eq!(strength, PatternType::Direct);
        assert_eq!(text, "influenced by");
    }

    #[test]
    fn test_first_person_cue_is_direct() {
        assert_eq!(cue("Bowie really influenced me a lot").unwrap().0, PatternType::Direct);
        assert_eq!(cue("Neu! were a huge influence").unwrap().0, PatternType::Direct);
    }

    #[test]
    fn test_comparison_cues_are_weak_without_fallback() {
        let m = find_cue("Critics compared us to Joy Division.").unwrap();
        assert_eq!(m.pattern.strength, PatternType::Weak);
        assert!(!m.pattern.allows_fallback);
        assert_eq!(cue("It sounds like Suicide").unwrap().0, PatternType::Weak);
    }

    #[test]
    fn test_bands_like_is_strong_without_fallback() {
        let m = find_cue("They toured with bands like Wire and Gang of Four.").unwrap();
        assert_eq!(m.pattern.strength, PatternType::Strong);
        assert!(!m.pattern.allows_fallback);
    }

    #[test]
    fn test_cited_guard_skips_passive_form() {
        // "cites as influence by" is rejected; nothing else in the table fits
        assert!(find_cue("He cites as influence by nobody").is_none());
        let (strength, text) = cue("She cited Nico as an influence").unwrap();
        assert_eq!(strength, PatternType::Direct);
        assert_eq!(text, "cited Nico as an influence");
    }

    #[test]
    fn test_no_cue() {
        assert!(find_cue("The band formed in Leeds in 1977.").is_none());
    }

    #[test]
    fn test_reverse_detector() {
        assert!(is_reverse_influence("The Beatles have been cited as an influence by countless artists"));
        assert!(is_reverse_influence("Kraftwerk are widely influential"));
        assert!(is_reverse_influence("They have influenced numerous bands"));
        assert!(!is_reverse_influence("They were influenced by Kraftwerk"));
    }

    #[test]
    fn test_subject_reverse_check() {
        assert!(mentions_subject_as_influence("Many acts were  influenced by the Stooges.", "Stooges"));
        assert!(mentions_subject_as_influence("Blur, influenced by Kinks’ records", "kinks'"));
        assert!(!mentions_subject_as_influence("The Stooges were influenced by MC5.", "Stooges"));
        assert!(!mentions_subject_as_influence("influenced by anyone", "  "));
    }

    #[test]
    fn test_direction_admits() {
        assert!(Direction::After.admits((10, 15), (0, 10)));
        assert!(!Direction::After.admits((2, 5), (0, 10)));
        assert!(Direction::Any.admits((2, 5), (0, 10)));
        assert!(!Direction::Any.admits((8, 12), (0, 10)));
        assert!(Direction::Any.admits((12, 15), (0, 10)));
    }

    #[test]
    fn test_table_order_direct_then_strong_then_weak() {
        let strengths: Vec<_> = cue_patterns().iter().map(|p| p.strength).collect();
        let first_strong = strengths.iter().position(|s| *s == PatternType::Strong).unwrap();
        let first_weak = strengths.iter().position(|s| *s == PatternType::Weak).unwrap();
        assert!(strengths[..first_strong].iter().all(|s| *s == PatternType::Direct));
        assert!(strengths[first_strong..first_weak].iter().all(|s| *s == PatternType::Strong));
        assert!(strengths[first_weak..].iter().all(|s| *s == PatternType::Weak));
    }
}
