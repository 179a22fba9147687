/*!
 * Sentence boundary detection.
 *
 * `RuleSplitter` is a Punkt-style heuristic for English prose: `!` and `?`
 * followed by whitespace always end a sentence; a period does unless the word
 * before it is a known abbreviation or an initial, or the next word starts in
 * lowercase.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::errors::HumaniseError;

/// Narrow splitting capability the orchestrator depends on
pub trait SentenceSplitter: Send + Sync {
    /// Ordered, non-empty sentences of `text`
    fn split_sentences(&self, text: &str) -> Result<Vec<String>, HumaniseError>;
}

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid token regex"));

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "cf",
        "al", "inc", "ltd", "co", "corp", "dept", "est", "fig", "gen", "gov", "lt", "col",
        "capt", "sgt", "rev", "hon", "approx", "jan", "feb", "aug", "sept", "oct", "nov",
        "dec", "mt", "ave", "blvd", "rd", "u.s", "u.k", "a.m", "p.m", "ph.d", "vol",
    ]
    .into_iter()
    .collect()
});

const CLOSING_PUNCTUATION: &[char] = &['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}'];
const OPENING_PUNCTUATION: &[char] = &['"', '\'', '(', '[', '{', '\u{201C}', '\u{2018}'];

/// Rule-based English sentence splitter
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSplitter;

impl RuleSplitter {
    pub fn new() -> Self {
        Self
    }

    /// Split without the `Result` wrapper; this splitter cannot fail
    pub fn split(text: &str) -> Vec<String> {
        let tokens: Vec<(usize, usize)> = TOKEN_RE
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();

        let mut sentences = Vec::new();
        let mut sentence_start: Option<usize> = None;

        for (i, &(start, end)) in tokens.iter().enumerate() {
            sentence_start.get_or_insert(start);
            let next = tokens.get(i + 1).map(|&(s, e)| &text[s..e]);

            if ends_sentence(&text[start..end], next) {
                if let Some(from) = sentence_start.take() {
                    push_sentence(&mut sentences, &text[from..end]);
                }
            }
        }

        if let (Some(from), Some(&(_, end))) = (sentence_start, tokens.last()) {
            push_sentence(&mut sentences, &text[from..end]);
        }

        sentences
    }
}

impl SentenceSplitter for RuleSplitter {
    fn split_sentences(&self, text: &str) -> Result<Vec<String>, HumaniseError> {
        Ok(Self::split(text))
    }
}

fn push_sentence(sentences: &mut Vec<String>, sentence: &str) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn ends_sentence(token: &str, next: Option<&str>) -> bool {
    let core = token.trim_end_matches(CLOSING_PUNCTUATION);
    let Some(last) = core.chars().last() else {
        return false;
    };

    let next_starts_lowercase = next
        .and_then(|n| n.trim_start_matches(OPENING_PUNCTUATION).chars().next())
        .is_some_and(|c| c.is_lowercase());

    match last {
        '!' | '?' => true,
        '.' => {
            if next_starts_lowercase {
                return false;
            }
            if next.is_none() {
                return true;
            }
            let word = core
                .trim_end_matches('.')
                .trim_start_matches(OPENING_PUNCTUATION);
            !is_abbreviation(word) && !is_initial(word)
        }
        _ => false,
    }
}

fn is_abbreviation(word: &str) -> bool {
    !word.is_empty() && ABBREVIATIONS.contains(word.to_lowercase().as_str())
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic() && c.is_uppercase())
}
