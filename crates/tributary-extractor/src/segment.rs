//! Default sentence segmenter

use std::ops::Range;
use tributary_domain::traits::SentenceSegmenter;

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "st", "jr", "sr", "vs", "feat", "ft", "vol", "etc", "approx",
];

/// Splits on terminal punctuation followed by a sentence start, and on
/// blank lines.
///
/// A `.`, `!` or `?` (plus any closing quotes or brackets) ends a sentence
/// when whitespace follows and the next character is uppercase, a digit or
/// an opening quote. Periods after common abbreviations and single-letter
/// initials ("B. B. King") do not end a sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | '”' | '’' | ')' | ']')
}

fn starts_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '“' | '\'' | '‘' | '(')
}

/// Word immediately before a period is an abbreviation or an initial
fn is_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_uppercase();
    }
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

impl SentenceSegmenter for PunctuationSegmenter {
    fn segment(&self, text: &str) -> Vec<Range<usize>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut spans = Vec::new();
        let mut push = |range: Range<usize>| {
            if !text[range.clone()].trim().is_empty() {
                spans.push(range);
            }
        };

        let mut start = 0;
        let mut i = 0;
        while i < chars.len() {
            let (pos, c) = chars[i];

            if c == '\n' {
                let mut j = i + 1;
                while j < chars.len() && chars[j].1 != '\n' && chars[j].1.is_whitespace() {
                    j += 1;
                }
                if j < chars.len() && chars[j].1 == '\n' {
                    push(start..pos);
                    start = chars[j].0 + 1;
                    i = j + 1;
                    continue;
                }
            }

            if matches!(c, '.' | '!' | '?') {
                let mut j = i + 1;
                while j < chars.len() && is_closer(chars[j].1) {
                    j += 1;
                }
                let mut k = j;
                while k < chars.len() && chars[k].1.is_whitespace() {
                    k += 1;
                }
                let boundary = k > j
                    && k < chars.len()
                    && starts_sentence(chars[k].1)
                    && !(c == '.' && is_abbreviation(&text[start..pos]));
                if boundary {
                    let end = chars[j].0;
                    push(start..end);
                    start = end;
                    i = j;
                    continue;
                }
            }

            i += 1;
        }

        push(start..text.len());
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        PunctuationSegmenter
            .segment(text)
            .into_iter()
            .map(|r| text[r].trim())
            .collect()
    }

    #[test]
    fn test_splits_on_terminal_punctuation() {
        assert_eq!(
            sentences("They formed in 1985. Their influences include Can! Really? Yes."),
            vec!["They formed in 1985.", "Their influences include Can!", "Really?", "Yes."]
        );
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        assert_eq!(sentences("He liked the U.K. scene. e.g. punk"), vec!["He liked the U.K. scene. e.g. punk"]);
    }

    #[test]
    fn test_initials_and_abbreviations() {
        assert_eq!(
            sentences("She grew up listening to B. B. King and Dr. John. Then she moved."),
            vec!["She grew up listening to B. B. King and Dr. John.", "Then she moved."]
        );
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        assert_eq!(
            sentences("He said \"we love Neu!\" The band agreed."),
            vec!["He said \"we love Neu!\"", "The band agreed."]
        );
    }

    #[test]
    fn test_blank_line_splits() {
        assert_eq!(
            sentences("Early years\n\nThey were influenced by Can"),
            vec!["Early years", "They were influenced by Can"]
        );
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(sentences("").is_empty());
        assert!(sentences("  \n \n ").is_empty());
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let text = "One. Two! Three? Four.";
        let spans = PunctuationSegmenter.segment(text);
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert_eq!(spans.len(), 4);
    }
}
