//! Entity recognizers and the entity filters applied after a cue match

use regex::Regex;
use std::sync::LazyLock;
use tributary_domain::traits::{Entity, EntityLabel, EntityRecognizer};

static LABELISH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(Records|Recordings|Label|Studio|Studios)\b").expect("valid regex"));
static ROLE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(guitarist|drummer|bassist|singer|vocalist|producer|composer|rapper|dj|member|frontman|frontwoman)\b",
    )
    .expect("valid regex")
});
static ABSTRACT_OWNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:'s|’s)\s+(admiration|work|production|piece)\b").expect("valid regex"));

/// Organization that is a record label or studio
pub fn is_labelish_org(entity: &Entity) -> bool {
    entity.label == EntityLabel::Organization && LABELISH.is_match(&entity.text)
}

/// Organization used as a role descriptor for a person named later.
///
/// "Stooges guitarist James Williamson": the organization is followed by a
/// role word within `window` characters and a person entity appears after it.
pub fn is_role_descriptor(sentence: &str, entity: &Entity, entities: &[Entity], window: usize) -> bool {
    if entity.label != EntityLabel::Organization {
        return false;
    }
    let Some(tail) = sentence.get(entity.end..) else {
        return false;
    };
    let end = tail.char_indices().nth(window).map_or(tail.len(), |(i, _)| i);
    if !ROLE_WORD.is_match(&tail[..end]) {
        return false;
    }
    entities
        .iter()
        .any(|other| other.label == EntityLabel::Person && other.start > entity.end)
}

/// Entity owning an abstract noun ("Eno's production"), not an influence itself
pub fn is_abstract_owner(sentence: &str, entity: &Entity) -> bool {
    sentence
        .get(entity.end..)
        .is_some_and(|tail| ABSTRACT_OWNER.is_match(tail))
}

/// Recognizer that never finds anything.
///
/// Cue extraction then relies on the fallback splitter alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntities;

impl EntityRecognizer for NoEntities {
    fn recognize(&self, _sentence: &str) -> Vec<Entity> {
        Vec::new()
    }
}

const CONNECTORS: &[&str] = &["of", "the", "&"];
const ORG_SUFFIXES: &[&str] = &[
    "Records",
    "Recordings",
    "Label",
    "Studio",
    "Studios",
    "Band",
    "Group",
    "Orchestra",
];
const SENTENCE_OPENERS: &[&str] = &[
    "A", "An", "The", "He", "She", "It", "They", "We", "I", "You", "His", "Her", "Its", "Their", "Our", "This",
    "These", "Those", "In", "On", "At", "After", "Before", "During", "When", "While", "As", "But", "And",
];

#[derive(Debug)]
struct Word<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    /// Trailing punctuation closes any span ending here
    closes: bool,
}

impl Word<'_> {
    fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_connector(&self) -> bool {
        CONNECTORS.contains(&self.text)
    }
}

fn split_words(sentence: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut offset = 0;
    for raw in sentence.split_inclusive(char::is_whitespace) {
        let start_of_raw = offset;
        offset += raw.len();

        let trimmed = raw.trim_end();
        let lead = trimmed.len() - trimmed.trim_start_matches(['(', '"', '“', '\'']).len();
        let core = &trimmed[lead..];
        let body = core.trim_end_matches([',', '.', ';', ':', '?', ')', '"', '”']);
        let body = body
            .strip_suffix("'s")
            .or_else(|| body.strip_suffix("’s"))
            .unwrap_or(body);
        if body.is_empty() {
            continue;
        }

        let start = start_of_raw + lead;
        words.push(Word {
            text: body,
            start,
            end: start + body.len(),
            closes: body.len() < core.len(),
        });
    }
    words
}

/// Heuristic recognizer: runs of capitalized words.
///
/// Runs may join across "of", "the" and "&" ("Gang of Four", "Echo & the
/// Bunnymen") but stop at punctuation and at "and". A single pronoun or
/// article at the start of the sentence is skipped. Spans ending in a
/// label/ensemble word are tagged `Organization`, everything else `Person`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizedSpanRecognizer;

impl EntityRecognizer for CapitalizedSpanRecognizer {
    fn recognize(&self, sentence: &str) -> Vec<Entity> {
        let words = split_words(sentence);
        let mut entities = Vec::new();
        let mut i = 0;

        while i < words.len() {
            if !words[i].is_capitalized() {
                i += 1;
                continue;
            }

            let first = i;
            let mut last = i;
            while !words[last].closes && last + 1 < words.len() {
                if words[last + 1].is_capitalized() {
                    last += 1;
                    continue;
                }
                let mut next = last + 1;
                while words.get(next).is_some_and(|w| w.is_connector() && !w.closes) {
                    next += 1;
                }
                if next > last + 1 && words.get(next).is_some_and(Word::is_capitalized) {
                    last = next;
                } else {
                    break;
                }
            }
            i = last + 1;

            if first == 0 && first == last && SENTENCE_OPENERS.contains(&words[first].text) {
                continue;
            }

            let (start, end) = (words[first].start, words[last].end);
            let label = if ORG_SUFFIXES.contains(&words[last].text) {
                EntityLabel::Organization
            } else {
                EntityLabel::Person
            };
            entities.push(Entity::new(&sentence[start..end], label, start, end));
        }

        entities
    }
}
