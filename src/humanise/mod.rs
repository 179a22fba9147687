/*!
 * Humanisation pipeline.
 *
 * - `splitter`: sentence boundary detection
 * - `core`: the passage orchestrator and the per-sentence transformer trait
 * - `lexical`: random synonym substitution
 * - `neural`: sequence-to-sequence paraphrasing
 * - `random`: injectable random sources for the lexical strategy
 */

pub mod core;
pub mod lexical;
pub mod neural;
pub mod random;
pub mod splitter;

pub use self::core::{Humaniser, SentenceTransformer};
pub use self::lexical::LexicalTransformer;
pub use self::neural::{NeuralTransformer, ParaphraseModel};
pub use self::random::{RandomSource, SeededRandom, ThreadRandom};
pub use self::splitter::{RuleSplitter, SentenceSplitter};
