/*!
 * Tests for WordNet loading and synonym lookup
 */

use humaniser::errors::LexiconError;
use humaniser::lexicon::{load_lexicon, PartOfSpeech, SynonymLookup, WordNet};

use crate::common;

#[test]
fn test_load_fixtureDirectory_shouldIndexAllFiles() {
    let dir = common::create_wordnet_dir().unwrap();
    let wordnet = WordNet::load(dir.path()).unwrap();

    assert_eq!(wordnet.sense_count(), 7);
    assert!(wordnet.lemma_count() >= 10);
}

#[test]
fn test_lookup_shouldReturnSensesInPartOfSpeechOrder() {
    let dir = common::create_wordnet_dir().unwrap();
    let wordnet = WordNet::load(dir.path()).unwrap();

    let senses = wordnet.lookup_synonyms("quick");
    assert_eq!(senses.len(), 2);
    assert!(senses.iter().all(|s| s.pos == PartOfSpeech::Adjective));
    assert_eq!(senses[0].lemmas, vec!["quick", "speedy"]);
    assert_eq!(senses[1].lemmas, vec!["fast", "quick"]);

    let dog = wordnet.lookup_synonyms("dog");
    assert_eq!(dog.len(), 2);
    assert_eq!(dog[0].lemmas, vec!["dog", "domestic_dog", "Canis_familiaris"]);
}

#[test]
fn test_lookup_caseAndInflection_shouldReduceToLemma() {
    let dir = common::create_wordnet_dir().unwrap();
    let wordnet = WordNet::load(dir.path()).unwrap();

    assert_eq!(wordnet.lookup_synonyms("Dogs").len(), 2);
    assert_eq!(wordnet.lookup_synonyms("jumps").len(), 1);
    assert_eq!(wordnet.lookup_synonyms("leapt").len(), 1);
    assert_eq!(wordnet.lookup_synonyms("quicker").len(), 2);
}

#[test]
fn test_lookup_unknownOrPunctuated_shouldMiss() {
    let dir = common::create_wordnet_dir().unwrap();
    let wordnet = WordNet::load(dir.path()).unwrap();

    assert!(wordnet.lookup_synonyms("the").is_empty());
    assert!(wordnet.lookup_synonyms("jumps.").is_empty());
    assert!(wordnet.lookup_synonyms("").is_empty());
}

#[test]
fn test_load_emptyDirectory_shouldReportMissingData() {
    let dir = common::create_temp_dir().unwrap();
    assert!(matches!(
        WordNet::load(dir.path()),
        Err(LexiconError::MissingData(_))
    ));
}

#[test]
fn test_load_malformedData_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    common::create_test_file(dir.path(), "data.noun", "02084071 05 x 01 dog 0 000 | bad type\n").unwrap();
    assert!(matches!(
        WordNet::load(dir.path()),
        Err(LexiconError::Malformed { .. })
    ));
}

#[test]
fn test_loadLexicon_missingDirectory_shouldDegradeToEmpty() {
    common::init_test_logging();
    let dir = common::create_temp_dir().unwrap();
    let lexicon = load_lexicon(&dir.path().join("absent"));

    assert_eq!(lexicon.sense_count(), 0);
    assert!(lexicon.lookup_synonyms("dog").is_empty());
}
