//! Inverted index over name variants and literal multi-token matching

use std::cmp::Ordering;
use std::collections::HashMap;
use tributary_domain::{tokenize, MatchForm, NameVariantEntry, VariantRecord};

/// A literal roster match inside a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatch {
    /// Roster display name
    pub canonical_name: String,
    /// Matched normalized tokens, space-joined
    pub mention_text: String,
    /// Which variant form matched
    pub match_form: MatchForm,
    /// Token position where the match starts
    pub start_token: usize,
    /// Number of tokens matched
    pub token_count: usize,
}

/// First-token buckets of name variants, longest variant first.
///
/// Immutable once built; rebuilds produce a new index.
#[derive(Debug, Clone, Default)]
pub struct VariantIndex {
    buckets: HashMap<String, Vec<NameVariantEntry>>,
    len: usize,
}

impl VariantIndex {
    /// Build from variants, bucketing each under its first token
    pub fn from_variants(variants: impl IntoIterator<Item = NameVariantEntry>) -> Self {
        Self::from_bucketed(variants.into_iter().filter_map(|entry| {
            let bucket = entry.first_token()?.to_string();
            Some((bucket, entry))
        }))
    }

    /// Build from persisted rows; rows without usable tokens are dropped
    pub fn from_records(records: impl IntoIterator<Item = VariantRecord>) -> Self {
        Self::from_bucketed(records.into_iter().filter_map(VariantRecord::into_entry))
    }

    fn from_bucketed(entries: impl Iterator<Item = (String, NameVariantEntry)>) -> Self {
        let mut buckets: HashMap<String, Vec<NameVariantEntry>> = HashMap::new();
        let mut len = 0;
        for (bucket, entry) in entries {
            buckets.entry(bucket).or_default().push(entry);
            len += 1;
        }
        for bucket in buckets.values_mut() {
            // stable: equal-length variants keep roster order
            bucket.sort_by(longest_first);
        }
        Self { buckets, len }
    }

    /// Total number of variants
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no variants are indexed
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of first-token buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Variants starting with `token`, longest first
    pub fn bucket(&self, token: &str) -> &[NameVariantEntry] {
        self.buckets.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find literal roster matches in `text`.
    ///
    /// At each token position the longest matching variant wins and shorter
    /// variants starting there are not tried. Matches are returned in token
    /// order; overlapping matches starting at later positions are kept.
    pub fn find_matches(&self, text: &str) -> Vec<LiteralMatch> {
        let tokens = tokenize(text);
        let mut matches = Vec::new();

        for start in 0..tokens.len() {
            for entry in self.bucket(&tokens[start]) {
                let end = start + entry.token_count;
                if end > tokens.len() || tokens[start..end] != entry.tokens[..] {
                    continue;
                }
                matches.push(LiteralMatch {
                    canonical_name: entry.canonical_name.clone(),
                    mention_text: tokens[start..end].join(" "),
                    match_form: entry.match_form,
                    start_token: start,
                    token_count: entry.token_count,
                });
                break;
            }
        }

        matches
    }
}

fn longest_first(a: &NameVariantEntry, b: &NameVariantEntry) -> Ordering {
    b.token_count
        .cmp(&a.token_count)
        .then_with(|| b.char_len.cmp(&a.char_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::{build_variants, normalize_denylist};
    use std::collections::HashSet;

    fn index(names: &[&str]) -> VariantIndex {
        VariantIndex::from_variants(build_variants(names, &HashSet::new(), "seed"))
    }

    #[test]
    fn test_buckets_sorted_longest_first() {
        let idx = index(&["Can", "Can Can Dancers", "Canned Heat"]);
        let bucket: Vec<_> = idx.bucket("can").iter().map(|v| v.variant_norm.as_str()).collect();
        assert_eq!(bucket, vec!["can can dancers", "can"]);
        assert_eq!(idx.bucket("canned").len(), 1);
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn test_longest_variant_wins_at_position() {
        let idx = index(&["Pink", "Pink Floyd"]);
        let matches = idx.find_matches("She loved Pink Floyd records.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].canonical_name, "Pink Floyd");
        assert_eq!(matches[0].mention_text, "pink floyd");
        assert_eq!(matches[0].start_token, 2);
    }

    #[test]
    fn test_stripped_and_full_forms_match() {
        let idx = index(&["The Beatles"]);
        let stripped = idx.find_matches("influenced by Beatles");
        assert_eq!(stripped.len(), 1);
        assert_eq!(stripped[0].match_form, MatchForm::TheStripped);
        assert_eq!(stripped[0].canonical_name, "The Beatles");

        let full = idx.find_matches("influenced by The Beatles");
        assert_eq!(full[0].match_form, MatchForm::Full);
        // "beatles" also matches on its own at the next position
        assert_eq!(full.len(), 2);
        assert_eq!(full[1].match_form, MatchForm::TheStripped);
    }

    #[test]
    fn test_denylisted_stripped_form_absent() {
        let deny = normalize_denylist(["the who"]);
        let idx = VariantIndex::from_variants(build_variants(&["The Who"], &deny, "seed"));
        assert!(idx.find_matches("who knows").is_empty());
        assert_eq!(idx.find_matches("like The Who").len(), 1);
    }

    #[test]
    fn test_partial_window_does_not_match() {
        let idx = index(&["Sonic Youth"]);
        assert!(idx.find_matches("a sonic boom").is_empty());
        assert!(idx.find_matches("sonic").is_empty());
    }

    #[test]
    fn test_from_records_recomputes_missing_columns() {
        let record = VariantRecord {
            canonical_name: "Kraftwerk".to_string(),
            variant_norm: "Kraftwerk".to_string(),
            first_token: None,
            token_count: None,
            char_len: None,
            source: "seed".to_string(),
            match_form: "full".to_string(),
        };
        let blank = VariantRecord {
            variant_norm: "  ".to_string(),
            ..record.clone()
        };
        let idx = VariantIndex::from_records(vec![record, blank]);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.find_matches("kraftwerk")[0].canonical_name, "Kraftwerk");
    }

    #[test]
    fn test_empty_index_and_text() {
        assert!(VariantIndex::default().is_empty());
        assert!(index(&["Eno"]).find_matches("").is_empty());
    }
}
