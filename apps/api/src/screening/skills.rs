//! Skill phrase extraction: segmenter candidates filtered by domain hints.

use std::collections::BTreeSet;

use tracing::trace;

use crate::screening::domain::Domain;
use crate::screening::segmenter::{PhraseSegmenter, PhraseSpan};

/// Phrases containing any of these substrings describe context, not a skill.
const BLACKLIST: &[&str] = &[
    "experience",
    "project",
    "months",
    "years",
    "users",
    "team",
    "company",
    "solution",
    "role",
    "responsibility",
    "salary",
    "award",
    "effort",
    "work",
];

const MAX_PHRASE_WORDS: usize = 3;

/// Returns the deduplicated skill phrases of `text`, sorted lexicographically.
///
/// Spans the segmenter reports that do not land on valid character boundaries
/// of `text` are skipped.
pub fn extract_skills(text: &str, domain: Domain, segmenter: &dyn PhraseSegmenter) -> Vec<String> {
    let hints = domain.skill_hints();
    let mut skills = BTreeSet::new();

    for span in segmenter.segment(text) {
        let Some(raw) = span_text(text, span) else {
            trace!(?span, "Skipping span outside text boundaries");
            continue;
        };
        let Some(phrase) = normalize_phrase(raw) else {
            continue;
        };
        if BLACKLIST.iter().any(|b| phrase.contains(b)) {
            continue;
        }
        if !hints.is_empty() && !hints.iter().any(|h| phrase.contains(h)) {
            continue;
        }
        skills.insert(phrase);
    }

    skills.into_iter().collect()
}

fn span_text(text: &str, span: PhraseSpan) -> Option<&str> {
    text.get(span.range())
}

/// Keeps ASCII letters and spaces, lowercases and trims. Returns `None` for
/// empty results and for phrases longer than three words.
pub fn normalize_phrase(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect::<String>()
        .to_lowercase();
    let phrase = kept.trim();

    if phrase.is_empty() || phrase.split_whitespace().count() > MAX_PHRASE_WORDS {
        return None;
    }
    Some(phrase.to_string())
}
