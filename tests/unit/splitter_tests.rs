/*!
 * Tests for sentence boundary detection
 */

use humaniser::humanise::{RuleSplitter, SentenceSplitter};

#[test]
fn test_splitSentences_twoSentences_shouldReturnBothInOrder() {
    let sentences = RuleSplitter.split_sentences("Hello world. Goodbye world.").unwrap();
    assert_eq!(sentences, vec!["Hello world.", "Goodbye world."]);
}

#[test]
fn test_splitSentences_noTerminalPunctuation_shouldReturnWholeText() {
    let sentences = RuleSplitter.split_sentences("  just a fragment without an end  ").unwrap();
    assert_eq!(sentences, vec!["just a fragment without an end"]);
}

#[test]
fn test_splitSentences_titlesAndAbbreviations_shouldStayTogether() {
    let text = "Dr. Watson met Mrs. Hudson, e.g. at noon. They talked.";
    let sentences = RuleSplitter.split_sentences(text).unwrap();
    assert_eq!(
        sentences,
        vec!["Dr. Watson met Mrs. Hudson, e.g. at noon.", "They talked."]
    );
}

#[test]
fn test_splitSentences_quotedEnding_shouldKeepClosingQuote() {
    let sentences = RuleSplitter.split_sentences("She said \"stop.\" Then she left.").unwrap();
    assert_eq!(sentences, vec!["She said \"stop.\"", "Then she left."]);
}

#[test]
fn test_splitSentences_numbersAndEllipsis_shouldNotOverSplit() {
    let sentences = RuleSplitter.split_sentences("Pi is 3.14 roughly. Wait... what? Yes.").unwrap();
    assert_eq!(sentences, vec!["Pi is 3.14 roughly.", "Wait... what?", "Yes."]);
}

#[test]
fn test_splitSentences_everySentenceNonEmpty() {
    let text = "One.  Two!\n\nThree?   Four.";
    let sentences = RuleSplitter.split_sentences(text).unwrap();
    assert_eq!(sentences.len(), 4);
    assert!(sentences.iter().all(|s| !s.trim().is_empty()));
}
