/*!
 * Tests for random synonym substitution
 */

use std::sync::Arc;

use humaniser::humanise::{LexicalTransformer, SentenceTransformer};
use humaniser::lexicon::{EmptyLexicon, InMemoryLexicon, PartOfSpeech, SynonymLookup, WordNet};

use crate::common::{self, FixedRandom, ScriptedRandom};

fn small_lexicon() -> Arc<dyn SynonymLookup> {
    Arc::new(
        InMemoryLexicon::new()
            .with_sense("big", PartOfSpeech::Adjective, &["big", "large"])
            .with_sense("big", PartOfSpeech::Adjective, &["big", "bad", "BIG"])
            .with_sense("run", PartOfSpeech::Verb, &["run"])
            .with_sense("car", PartOfSpeech::Noun, &["car", "motor_vehicle", "automobile"]),
    )
}

/// With p = 1 every token with candidates changes to one of them
#[tokio::test]
async fn test_transform_probabilityOne_shouldReplaceWithCandidate() {
    for index in 0..3 {
        let random = FixedRandom { unit: 0.5, index };
        let transformer = LexicalTransformer::new(small_lexicon(), Arc::new(random)).with_probability(1.0);

        let output = transformer.transform("big car").await.unwrap();
        let tokens: Vec<&str> = output.splitn(2, ' ').collect();

        let big = transformer.candidates("big");
        assert_eq!(big, vec!["large", "bad"]);
        assert!(big.iter().any(|c| c == tokens[0]));
        assert_ne!(tokens[0], "big");
    }
}

/// Underscored lemmas are rendered with spaces
#[test]
fn test_candidates_multiWordLemma_shouldUseSpaces() {
    let transformer = LexicalTransformer::new(small_lexicon(), Arc::new(FixedRandom::always()));
    assert_eq!(transformer.candidates("car"), vec!["motor vehicle", "automobile"]);
}

/// Tokens without candidates stay unchanged regardless of the draw
#[tokio::test]
async fn test_transform_noCandidates_shouldKeepToken() {
    let transformer = LexicalTransformer::new(small_lexicon(), Arc::new(FixedRandom::always()))
        .with_probability(1.0);

    assert_eq!(transformer.transform("run home").await.unwrap(), "run home");
}

/// With p = 0 the sentence comes back token for token
#[tokio::test]
async fn test_transform_probabilityZero_shouldReturnInput() {
    let transformer = LexicalTransformer::new(small_lexicon(), Arc::new(FixedRandom::always()))
        .with_probability(0.0);

    let output = transformer.transform("big  car\tover there").await.unwrap();
    assert_eq!(output, "big car over there");
}

/// Each token gets its own independent draw
#[tokio::test]
async fn test_transform_scriptedDraws_shouldOnlyReplaceSelectedTokens() {
    let random = ScriptedRandom::new(&[0.1, 0.9, 0.2], &[1, 2]);
    let transformer = LexicalTransformer::new(small_lexicon(), Arc::new(random));

    let output = transformer.transform("big car car").await.unwrap();
    assert_eq!(output, "bad car automobile");
}

/// An empty lexicon never substitutes anything
#[tokio::test]
async fn test_transform_emptyLexicon_shouldBeNoOp() {
    let transformer = LexicalTransformer::new(Arc::new(EmptyLexicon), Arc::new(FixedRandom::always()))
        .with_probability(1.0);

    assert_eq!(
        transformer.transform("The quick brown fox jumps.").await.unwrap(),
        "The quick brown fox jumps."
    );
}

/// Against WordNet data only the base-form tokens substitute; punctuation blocks lookup
#[tokio::test]
async fn test_transform_wordnetFixture_shouldReplaceKnownWords() {
    let dir = common::create_wordnet_dir().unwrap();
    let wordnet = WordNet::load(dir.path()).unwrap();
    let transformer = LexicalTransformer::new(Arc::new(wordnet), Arc::new(FixedRandom::always()))
        .with_probability(1.0);

    let output = transformer.transform("The quick brown fox jumps.").await.unwrap();
    assert_eq!(output, "The speedy brown fox jumps.");
}

#[test]
fn test_withProbability_outOfRange_shouldClamp() {
    let transformer = LexicalTransformer::new(small_lexicon(), Arc::new(FixedRandom::never()));
    assert_eq!(transformer.probability(), 0.3);
    assert_eq!(transformer.clone().with_probability(2.0).probability(), 1.0);
    assert_eq!(transformer.with_probability(-1.0).probability(), 0.0);
}
