/*!
 * Synonym lookup for the lexical strategy.
 *
 * - `wordnet`: loader for the WordNet dictionary files
 * - `morphy`: morphological reduction of inflected forms to base forms
 * - `provision`: locating an installed WordNet or downloading one
 *
 * A lookup never fails: an unknown word, a missing database or an empty one
 * all produce an empty list of senses.
 */

use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub mod morphy;
pub mod provision;
pub mod wordnet;

pub use self::provision::{resolve_wordnet_dir, WordNetFetcher};
pub use self::wordnet::WordNet;

/// Part of speech of a sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    /// Adjectives, including satellite adjectives
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Lookup order used when a word belongs to several parts of speech
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// Suffix of the WordNet files for this part of speech
    pub fn file_suffix(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }

    /// Map a WordNet `ss_type` character
    pub fn from_synset_type(ss_type: &str) -> Option<Self> {
        match ss_type {
            "n" => Some(PartOfSpeech::Noun),
            "v" => Some(PartOfSpeech::Verb),
            "a" | "s" => Some(PartOfSpeech::Adjective),
            "r" => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }
}

/// One meaning of a word: the lemmas that share it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    /// Part of speech of the sense
    pub pos: PartOfSpeech,
    /// Lemma names as stored, multi-word lemmas joined with `_`
    pub lemmas: Vec<String>,
}

impl Sense {
    pub fn new(pos: PartOfSpeech, lemmas: Vec<String>) -> Self {
        Self { pos, lemmas }
    }
}

/// Narrow lookup capability the lexical transformer depends on
pub trait SynonymLookup: Send + Sync {
    /// All senses of `token`, in the database's preferred order
    fn lookup_synonyms(&self, token: &str) -> Vec<Sense>;

    /// Number of senses held, for diagnostics
    fn sense_count(&self) -> usize;
}

/// Lexicon without entries; every lookup misses
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyLexicon;

impl SynonymLookup for EmptyLexicon {
    fn lookup_synonyms(&self, _token: &str) -> Vec<Sense> {
        Vec::new()
    }

    fn sense_count(&self) -> usize {
        0
    }
}

/// Exact-match lexicon held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryLexicon {
    entries: HashMap<String, Vec<Sense>>,
}

impl InMemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sense for `word`; lookups are case-sensitive
    pub fn with_sense(mut self, word: &str, pos: PartOfSpeech, lemmas: &[&str]) -> Self {
        self.entries
            .entry(word.to_string())
            .or_default()
            .push(Sense::new(pos, lemmas.iter().map(|l| l.to_string()).collect()));
        self
    }
}

impl SynonymLookup for InMemoryLexicon {
    fn lookup_synonyms(&self, token: &str) -> Vec<Sense> {
        self.entries.get(token).cloned().unwrap_or_default()
    }

    fn sense_count(&self) -> usize {
        self.entries.values().map(|senses| senses.len()).sum()
    }
}

/// Load the WordNet database from `dir`, degrading to an empty lexicon
/// when it is missing or unreadable.
pub fn load_lexicon(dir: &Path) -> Arc<dyn SynonymLookup> {
    match WordNet::load(dir) {
        Ok(wordnet) => {
            info!(
                "Loaded WordNet from {:?}: {} senses, {} lemmas",
                dir,
                wordnet.sense_count(),
                wordnet.lemma_count()
            );
            Arc::new(wordnet)
        }
        Err(e) => {
            warn!("Lexical database unavailable ({}); no words will be substituted", e);
            Arc::new(EmptyLexicon)
        }
    }
}
