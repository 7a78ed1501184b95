//! Variant generation from a roster of artist names

use std::collections::HashSet;
use tracing::debug;
use tributary_domain::{normalize_text, MatchForm, NameVariantEntry};

/// Normalize denylist entries the same way roster names are normalized
pub fn normalize_denylist<I, S>(entries: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| normalize_text(e.as_ref()))
        .filter(|e| !e.is_empty())
        .collect()
}

/// Generate matchable variants for every roster name.
///
/// Each name yields its full form. Names whose normalized form starts with
/// "the ", has more than one token and is not denylisted also yield a
/// "the_stripped" form, emitted before the full form. Names that normalize
/// to nothing are skipped.
///
/// # Examples
///
/// ```
/// use tributary_index::{build_variants, normalize_denylist};
/// use tributary_domain::MatchForm;
///
/// let deny = normalize_denylist(["The Who"]);
/// let variants = build_variants(&["The Beatles", "The Who"], &deny, "seed");
///
/// assert_eq!(variants.len(), 3);
/// assert_eq!(variants[0].variant_norm, "beatles");
/// assert_eq!(variants[0].match_form, MatchForm::TheStripped);
/// assert_eq!(variants[2].variant_norm, "the who");
/// ```
pub fn build_variants<S: AsRef<str>>(
    roster: &[S],
    denylist: &HashSet<String>,
    provenance: &str,
) -> Vec<NameVariantEntry> {
    let mut out = Vec::with_capacity(roster.len() * 2);

    for name in roster {
        let name = name.as_ref().trim();
        let norm = normalize_text(name);
        if norm.is_empty() {
            debug!(name = %name, "Skipping roster name with no tokens");
            continue;
        }

        if let Some(stripped) = stripped_form(&norm, denylist) {
            out.push(NameVariantEntry::new(name, stripped, provenance, MatchForm::TheStripped));
        }
        out.push(NameVariantEntry::new(name, norm, provenance, MatchForm::Full));
    }

    out
}

fn stripped_form(norm: &str, denylist: &HashSet<String>) -> Option<String> {
    let rest = norm.strip_prefix("the ")?;
    if rest.is_empty() || denylist.contains(norm) {
        return None;
    }
    Some(rest.to_string())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a stripped variant exists iff the normalized name starts
        /// with "the ", has at least two tokens and is not denylisted
        #[test]
        fn test_stripped_iff_eligible(
            name in "((The|the|THE) )?[A-Za-z]{1,8}( [A-Za-z]{1,8}){0,2}",
            deny_it in any::<bool>(),
        ) {
            let norm = normalize_text(&name);
            let deny = if deny_it { normalize_denylist([name.as_str()]) } else { HashSet::new() };
            let variants = build_variants(&[name.as_str()], &deny, "seed");

            let eligible = norm.starts_with("the ")
                && norm.split_whitespace().count() >= 2
                && !deny.contains(&norm);
            let stripped = variants.iter().any(|v| v.match_form == MatchForm::TheStripped);
            prop_assert_eq!(stripped, eligible);

            let full: Vec<_> = variants.iter().filter(|v| v.match_form == MatchForm::Full).collect();
            prop_assert_eq!(full.len(), 1);
            prop_assert_eq!(&full[0].variant_norm, &norm);
        }
    }
}
