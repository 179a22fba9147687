/*!
 * Passage orchestration.
 *
 * `Humaniser` splits a passage into sentences, hands every sentence to the
 * configured transformer and joins the results with a single space, in the
 * original order.
 */

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use log::debug;
use std::sync::Arc;
use std::time::Instant;

use super::splitter::SentenceSplitter;
use crate::errors::HumaniseError;

/// Rewrites a single sentence
#[async_trait]
pub trait SentenceTransformer: Send + Sync {
    /// Transform one sentence; the result replaces it in the output
    async fn transform(&self, sentence: &str) -> Result<String, HumaniseError>;
}

/// Splits, transforms and reassembles passages
#[derive(Clone)]
pub struct Humaniser {
    splitter: Arc<dyn SentenceSplitter>,
    transformer: Arc<dyn SentenceTransformer>,
    max_concurrent: usize,
}

impl Humaniser {
    /// Create a humaniser that transforms one sentence at a time
    pub fn new(
        splitter: Arc<dyn SentenceSplitter>,
        transformer: Arc<dyn SentenceTransformer>,
    ) -> Self {
        Self {
            splitter,
            transformer,
            max_concurrent: 1,
        }
    }

    /// Allow up to `max_concurrent` sentences of one passage in flight
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Humanise a passage
    ///
    /// Blank input yields an empty string without touching the splitter or
    /// the transformer. Any sentence failure fails the whole passage.
    pub async fn humanise(&self, passage: &str) -> Result<String, HumaniseError> {
        if passage.trim().is_empty() {
            return Ok(String::new());
        }

        let start_time = Instant::now();
        let sentences = self.splitter.split_sentences(passage)?;
        let total = sentences.len();
        debug!("Split passage into {} sentences", total);

        let results = stream::iter(sentences.into_iter().enumerate())
            .map(|(index, sentence)| {
                let transformer = Arc::clone(&self.transformer);
                async move {
                    let result = transformer.transform(&sentence).await;
                    (index, result)
                }
            })
            .buffer_unordered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        // Restore passage order
        let mut sorted_results = results;
        sorted_results.sort_by_key(|(index, _)| *index);

        let mut transformed = Vec::with_capacity(total);
        for (index, result) in sorted_results {
            match result {
                Ok(sentence) => transformed.push(sentence),
                Err(e) => {
                    debug!("Sentence {} of {} failed: {}", index + 1, total, e);
                    return Err(e);
                }
            }
        }

        debug!(
            "Humanised {} sentences in {:?}",
            total,
            start_time.elapsed()
        );

        Ok(transformed.join(" "))
    }
}

impl std::fmt::Debug for Humaniser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Humaniser")
            .field("max_concurrent", &self.max_concurrent)
            .finish_non_exhaustive()
    }
}
