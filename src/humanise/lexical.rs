/*!
 * Lexical strategy: random synonym substitution.
 *
 * Every whitespace-delimited token gets an independent draw; when the draw
 * falls below the substitution probability the token is replaced by a lemma
 * picked uniformly from all of its senses, excluding the token itself.
 */

use async_trait::async_trait;
use log::trace;
use std::sync::Arc;

use super::core::SentenceTransformer;
use super::random::RandomSource;
use crate::errors::HumaniseError;
use crate::lexicon::SynonymLookup;

/// Default chance that a token is considered for substitution
pub const DEFAULT_SUBSTITUTION_PROBABILITY: f64 = 0.3;

/// Synonym-substituting sentence transformer
#[derive(Clone)]
pub struct LexicalTransformer {
    lexicon: Arc<dyn SynonymLookup>,
    random: Arc<dyn RandomSource>,
    probability: f64,
}

impl LexicalTransformer {
    pub fn new(lexicon: Arc<dyn SynonymLookup>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            lexicon,
            random,
            probability: DEFAULT_SUBSTITUTION_PROBABILITY,
        }
    }

    /// Override the substitution probability, clamped to `[0, 1]`
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Rewrite one sentence; whitespace runs collapse to single spaces
    pub fn substitute(&self, sentence: &str) -> String {
        sentence
            .split_whitespace()
            .map(|token| self.substitute_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn substitute_token(&self, token: &str) -> String {
        if self.random.next_unit() >= self.probability {
            return token.to_string();
        }

        let candidates = self.candidates(token);
        if candidates.is_empty() {
            return token.to_string();
        }

        let choice = &candidates[self.random.choose_index(candidates.len())];
        trace!("Substituting '{}' with '{}'", token, choice);
        choice.clone()
    }

    /// Lemmas of every sense of `token` that differ from it ignoring case,
    /// in sense order, with `_` rendered as a space
    pub fn candidates(&self, token: &str) -> Vec<String> {
        let lowered = token.to_lowercase();
        self.lexicon
            .lookup_synonyms(token)
            .into_iter()
            .flat_map(|sense| sense.lemmas)
            .filter(|lemma| lemma.to_lowercase() != lowered)
            .map(|lemma| lemma.replace('_', " "))
            .collect()
    }
}

#[async_trait]
impl SentenceTransformer for LexicalTransformer {
    async fn transform(&self, sentence: &str) -> Result<String, HumaniseError> {
        Ok(self.substitute(sentence))
    }
}
