/*!
 * WordNet dictionary loader.
 *
 * Reads the `data.{noun,verb,adj,adv}` synset files and the matching
 * `*.exc` exception lists from a WordNet 3.x `dict` directory. Glosses and
 * pointers are not kept; only the lemma groups matter for substitution.
 */

use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::morphy;
use super::{PartOfSpeech, Sense, SynonymLookup};
use crate::errors::LexiconError;

/// In-memory WordNet database
#[derive(Debug, Default)]
pub struct WordNet {
    /// Every synset, in load order
    senses: Vec<Sense>,
    /// Lowercase lemma -> synset ids, per part of speech
    index: HashMap<PartOfSpeech, HashMap<String, Vec<usize>>>,
    /// Inflected form -> base forms, per part of speech
    exceptions: HashMap<PartOfSpeech, HashMap<String, Vec<String>>>,
}

impl WordNet {
    /// Load every available part of speech from `dir`
    pub fn load(dir: &Path) -> Result<Self, LexiconError> {
        let mut wordnet = WordNet::default();
        let mut data_files = 0;

        for pos in PartOfSpeech::ALL {
            let data_path = dir.join(format!("data.{}", pos.file_suffix()));
            if data_path.is_file() {
                let content = read_file(&data_path)?;
                wordnet.load_data(&content, &format!("data.{}", pos.file_suffix()))?;
                data_files += 1;
            } else {
                debug!("WordNet file {:?} not found, skipping", data_path);
            }

            let exc_path = dir.join(format!("{}.exc", pos.file_suffix()));
            if exc_path.is_file() {
                let content = read_file(&exc_path)?;
                wordnet.load_exceptions(pos, &content);
            }
        }

        if data_files == 0 {
            return Err(LexiconError::MissingData(dir.to_path_buf()));
        }

        Ok(wordnet)
    }

    /// Parse the contents of one `data.*` file
    pub fn load_data(&mut self, content: &str, file_name: &str) -> Result<(), LexiconError> {
        for (line_index, line) in content.lines().enumerate() {
            // Licence header lines start with two spaces
            if line.starts_with("  ") || line.trim().is_empty() {
                continue;
            }

            let malformed = |reason: &str| LexiconError::Malformed {
                file: file_name.to_string(),
                line: line_index + 1,
                reason: reason.to_string(),
            };

            let record = line.split('|').next().unwrap_or_default();
            let fields: Vec<&str> = record.split_whitespace().collect();
            if fields.len() < 4 {
                return Err(malformed("expected offset, lex_filenum, ss_type and w_cnt"));
            }

            let pos = PartOfSpeech::from_synset_type(fields[2])
                .ok_or_else(|| malformed(&format!("unknown synset type '{}'", fields[2])))?;
            let word_count = usize::from_str_radix(fields[3], 16)
                .map_err(|_| malformed(&format!("invalid word count '{}'", fields[3])))?;

            let words_end = 4 + word_count * 2;
            if fields.len() < words_end {
                return Err(malformed("word list shorter than its declared count"));
            }

            let lemmas: Vec<String> = fields[4..words_end]
                .iter()
                .step_by(2)
                .map(|word| strip_syntactic_marker(word).to_string())
                .collect();

            self.push_sense(Sense::new(pos, lemmas));
        }

        Ok(())
    }

    /// Parse the contents of one `*.exc` file
    pub fn load_exceptions(&mut self, pos: PartOfSpeech, content: &str) {
        let map = self.exceptions.entry(pos).or_default();
        for line in content.lines() {
            let mut words = line.split_whitespace();
            if let Some(inflected) = words.next() {
                let bases: Vec<String> = words.map(|w| w.to_string()).collect();
                if !bases.is_empty() {
                    map.insert(inflected.to_string(), bases);
                }
            }
        }
    }

    fn push_sense(&mut self, sense: Sense) {
        let id = self.senses.len();
        let by_lemma = self.index.entry(sense.pos).or_default();
        for lemma in &sense.lemmas {
            let ids = by_lemma.entry(lemma.to_lowercase()).or_default();
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
        self.senses.push(sense);
    }

    /// Number of distinct lemmas across all parts of speech
    pub fn lemma_count(&self) -> usize {
        self.index.values().map(|by_lemma| by_lemma.len()).sum()
    }

    fn contains(&self, pos: PartOfSpeech, lemma: &str) -> bool {
        self.index
            .get(&pos)
            .is_some_and(|by_lemma| by_lemma.contains_key(lemma))
    }
}

impl SynonymLookup for WordNet {
    fn lookup_synonyms(&self, token: &str) -> Vec<Sense> {
        let word = token.to_lowercase().replace(' ', "_");
        if word.is_empty() {
            return Vec::new();
        }

        let mut senses = Vec::new();
        for pos in PartOfSpeech::ALL {
            let Some(by_lemma) = self.index.get(&pos) else {
                continue;
            };
            let forms = morphy::base_forms(&word, pos, self.exceptions.get(&pos), |form| {
                self.contains(pos, form)
            });
            for form in forms {
                if let Some(ids) = by_lemma.get(&form) {
                    senses.extend(ids.iter().map(|&id| self.senses[id].clone()));
                }
            }
        }
        senses
    }

    fn sense_count(&self) -> usize {
        self.senses.len()
    }
}

fn read_file(path: &Path) -> Result<String, LexiconError> {
    fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Adjectives may carry a position marker such as `(a)`, `(p)` or `(ip)`
fn strip_syntactic_marker(word: &str) -> &str {
    if word.ends_with(')') {
        if let Some(open) = word.find('(') {
            return &word[..open];
        }
    }
    word
}
