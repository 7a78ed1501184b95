//! Cue-pattern extraction over single sentences

use std::collections::HashSet;
use tracing::trace;
use tributary_domain::traits::{Entity, EntityRecognizer};
use tributary_domain::{CandidateMethod, ExtractedCandidate};

use crate::canonical::{canonical_artist_name, looks_like_artist_name};
use crate::entities::{is_abstract_owner, is_labelish_org, is_role_descriptor};
use crate::fallback::{split_fallback, truncate_tail};
use crate::patterns::{find_cue, is_reverse_influence, mentions_subject_as_influence, CueMatch};

/// Whether a sentence states influence in the wrong direction for `subject`
pub fn is_reverse_sentence(sentence: &str, subject: Option<&str>) -> bool {
    is_reverse_influence(sentence) || subject.is_some_and(|s| mentions_subject_as_influence(sentence, s))
}

/// Finds cue-introduced influence names in sentences
pub struct CueExtractor<'r> {
    recognizer: &'r dyn EntityRecognizer,
    entity_window: usize,
}

impl<'r> CueExtractor<'r> {
    /// Create an extractor over a recognizer.
    ///
    /// `entity_window` is how many characters after an organization a role
    /// word may appear for the organization to count as a descriptor.
    pub fn new(recognizer: &'r dyn EntityRecognizer, entity_window: usize) -> Self {
        Self {
            recognizer,
            entity_window,
        }
    }

    /// Extract cue candidates from one sentence.
    ///
    /// Returns nothing for reverse-direction sentences and sentences
    /// without a cue. Candidates are unique by case-insensitive canonical
    /// name; the snippet is the trimmed sentence.
    pub fn extract_sentence(
        &self,
        sentence: &str,
        section_path: &str,
        subject: Option<&str>,
    ) -> Vec<ExtractedCandidate> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Vec::new();
        }
        if is_reverse_sentence(sentence, subject) {
            trace!(sentence, "Skipping reverse-direction sentence");
            return Vec::new();
        }
        let Some(cue) = find_cue(sentence) else {
            return Vec::new();
        };

        let entities = self.recognizer.recognize(sentence);
        let mut raw_names = self.eligible_entities(sentence, &entities, &cue);
        if cue.pattern.allows_fallback {
            let tail = sentence.get(cue.end..).unwrap_or_default();
            raw_names.extend(split_fallback(truncate_tail(tail)));
        }

        let method = CandidateMethod::Cue(cue.pattern.strength);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for raw in raw_names {
            let canonical = canonical_artist_name(&raw);
            if !looks_like_artist_name(&canonical) || !seen.insert(canonical.to_lowercase()) {
                continue;
            }
            candidates.push(ExtractedCandidate::new(canonical, raw.trim(), sentence, section_path, method));
        }

        trace!(
            cue = %cue.pattern.strength,
            candidates = candidates.len(),
            "Cue matched"
        );
        candidates
    }

    fn eligible_entities(&self, sentence: &str, entities: &[Entity], cue: &CueMatch) -> Vec<String> {
        entities
            .iter()
            .filter(|e| e.is_person_or_org())
            .filter(|e| !is_labelish_org(e))
            .filter(|e| !is_role_descriptor(sentence, e, entities, self.entity_window))
            .filter(|e| !is_abstract_owner(sentence, e))
            .filter(|e| cue.pattern.direction.admits((e.start, e.end), (cue.start, cue.end)))
            .map(|e| e.text.clone())
            .collect()
    }
}
