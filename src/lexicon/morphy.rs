/*!
 * Morphological reduction of inflected words to WordNet base forms.
 *
 * Candidates come from the exception lists first; otherwise from the word
 * itself plus the suffix detachment rules for the part of speech. Only
 * candidates that exist in the database survive, in first-seen order.
 */

use std::collections::{HashMap, HashSet};

use super::PartOfSpeech;

/// Suffix detachment rules as `(suffix, replacement)` pairs
fn detachment_rules(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        PartOfSpeech::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        PartOfSpeech::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        PartOfSpeech::Adverb => &[],
    }
}

/// Apply every matching detachment rule once
pub fn apply_rules(word: &str, pos: PartOfSpeech) -> Vec<String> {
    detachment_rules(pos)
        .iter()
        .filter(|(suffix, _)| word.ends_with(suffix))
        .map(|(suffix, replacement)| {
            let stem = &word[..word.len() - suffix.len()];
            format!("{}{}", stem, replacement)
        })
        .collect()
}

/// Base forms of `word` for `pos` that satisfy `exists`
pub fn base_forms<F>(
    word: &str,
    pos: PartOfSpeech,
    exceptions: Option<&HashMap<String, Vec<String>>>,
    exists: F,
) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let candidates: Vec<String> = match exceptions.and_then(|map| map.get(word)) {
        Some(bases) => std::iter::once(word.to_string())
            .chain(bases.iter().cloned())
            .collect(),
        None => std::iter::once(word.to_string())
            .chain(apply_rules(word, pos))
            .collect(),
    };

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|form| !form.is_empty() && exists(form))
        .filter(|form| seen.insert(form.clone()))
        .collect()
}
