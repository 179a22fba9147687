/*!
 * Common test utilities for the humaniser test suite
 */

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use humaniser::errors::HumaniseError;
use humaniser::humanise::{RandomSource, RuleSplitter, SentenceSplitter, SentenceTransformer};

/// Noun synsets used by the on-disk fixture
pub const DATA_NOUN: &str = "  1 This software and database is being provided to you, the LICENSEE, by\n\
02084071 05 n 03 dog 0 domestic_dog 0 Canis_familiaris 0 000 | a member of the genus Canis\n\
02118333 05 n 01 fox 0 000 | alert carnivorous mammal with pointed muzzle\n\
10001058 18 n 02 dog 1 frump 0 000 | a dull unattractive unpleasant girl or woman\n";

/// Verb synsets used by the on-disk fixture
pub const DATA_VERB: &str = "01963942 38 v 04 jump 0 leap 1 bound 0 spring 0 000 | move forward by leaps and bounds\n";

/// Adjective synsets used by the on-disk fixture
pub const DATA_ADJ: &str = "00980527 00 a 02 quick 0 speedy 0 000 | accomplishing rapidly\n\
00372111 00 a 01 brown 0 000 | of the color of wood or earth\n\
00976508 00 s 02 fast 0 quick(a) 0 000 | acting or moving or capable of acting or moving quickly\n";

/// Irregular verb forms used by the on-disk fixture
pub const VERB_EXC: &str = "leapt leap\n";

/// Route test logging through env_logger; repeated calls are harmless
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small WordNet dictionary directory
pub fn create_wordnet_dir() -> Result<TempDir> {
    let dir = create_temp_dir()?;
    create_test_file(dir.path(), "data.noun", DATA_NOUN)?;
    create_test_file(dir.path(), "data.verb", DATA_VERB)?;
    create_test_file(dir.path(), "data.adj", DATA_ADJ)?;
    create_test_file(dir.path(), "verb.exc", VERB_EXC)?;
    Ok(dir)
}

/// Random source that always returns the same draws
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    pub unit: f64,
    pub index: usize,
}

impl FixedRandom {
    /// Every token is considered and the first candidate is taken
    pub fn always() -> Self {
        Self { unit: 0.0, index: 0 }
    }

    /// No token is ever considered
    pub fn never() -> Self {
        Self { unit: 0.999, index: 0 }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.unit
    }

    fn choose_index(&self, len: usize) -> usize {
        self.index.min(len - 1)
    }
}

/// Random source that replays scripted draws in order, then repeats the last
#[derive(Debug)]
pub struct ScriptedRandom {
    units: Mutex<Vec<f64>>,
    indices: Mutex<Vec<usize>>,
}

impl ScriptedRandom {
    pub fn new(units: &[f64], indices: &[usize]) -> Self {
        Self {
            units: Mutex::new(units.iter().rev().copied().collect()),
            indices: Mutex::new(indices.iter().rev().copied().collect()),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        let mut units = self.units.lock();
        match units.len() {
            0 => 0.999,
            1 => units[0],
            _ => units.pop().unwrap_or(0.999),
        }
    }

    fn choose_index(&self, len: usize) -> usize {
        let mut indices = self.indices.lock();
        let index = match indices.len() {
            0 => 0,
            1 => indices[0],
            _ => indices.pop().unwrap_or(0),
        };
        index.min(len - 1)
    }
}

/// Splitter that counts its calls and delegates to the rule splitter
#[derive(Debug, Clone, Default)]
pub struct CountingSplitter {
    calls: Arc<AtomicUsize>,
}

impl CountingSplitter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentenceSplitter for CountingSplitter {
    fn split_sentences(&self, text: &str) -> Result<Vec<String>, HumaniseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RuleSplitter.split_sentences(text)
    }
}

/// Splitter that always fails, counting its calls
#[derive(Debug, Clone, Default)]
pub struct FailingSplitter {
    calls: Arc<AtomicUsize>,
}

impl FailingSplitter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentenceSplitter for FailingSplitter {
    fn split_sentences(&self, _text: &str) -> Result<Vec<String>, HumaniseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(HumaniseError::Splitter("tokenizer model unavailable".to_string()))
    }
}

/// Transformer that tags every sentence with its call order
#[derive(Debug, Clone, Default)]
pub struct CountingTransformer {
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl CountingTransformer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl SentenceTransformer for CountingTransformer {
    async fn transform(&self, sentence: &str) -> Result<String, HumaniseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(sentence.to_string());
        Ok(format!("[{}]", sentence))
    }
}

/// Transformer that sleeps longer for earlier sentences
#[derive(Debug, Clone, Copy)]
pub struct ReversedDelayTransformer {
    pub base_delay_ms: u64,
}

#[async_trait]
impl SentenceTransformer for ReversedDelayTransformer {
    async fn transform(&self, sentence: &str) -> Result<String, HumaniseError> {
        // Sentences look like "S3." ; lower numbers wait longer
        let number: u64 = sentence
            .trim_start_matches('S')
            .trim_end_matches('.')
            .parse()
            .unwrap_or(0);
        let delay = self.base_delay_ms * 10u64.saturating_sub(number);
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        Ok(sentence.to_lowercase())
    }
}
