/*!
 * Neural strategy: sequence-to-sequence paraphrasing.
 *
 * Each sentence is shaped as `"{prefix}{sentence} {end_marker}"`, sent to
 * the paraphrase model with the configured sampling settings, and the first
 * returned sequence is decoded with control tokens removed.
 */

use async_trait::async_trait;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use super::core::SentenceTransformer;
use crate::errors::{HumaniseError, ProviderError};
use crate::providers::{GenerationParams, Provider};

static CONTROL_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?s>|<pad>|<unk>").expect("valid control token regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Narrow generation capability the neural transformer depends on
#[async_trait]
pub trait ParaphraseModel: Send + Sync {
    /// Raw model output for an already shaped input
    async fn generate(&self, shaped_input: &str, params: &GenerationParams) -> Result<String, ProviderError>;
}

#[async_trait]
impl<P: Provider> ParaphraseModel for P {
    async fn generate(&self, shaped_input: &str, params: &GenerationParams) -> Result<String, ProviderError> {
        let request = self.build_request(shaped_input, params);
        let response = self.complete(request).await?;
        Ok(P::extract_text(&response))
    }
}

/// Paraphrasing sentence transformer
#[derive(Clone)]
pub struct NeuralTransformer {
    model: Arc<dyn ParaphraseModel>,
    params: GenerationParams,
    prefix: String,
    end_marker: String,
}

impl NeuralTransformer {
    /// Create a transformer with the default `"paraphrase: "` / `"</s>"` shaping
    pub fn new(model: Arc<dyn ParaphraseModel>, params: GenerationParams) -> Self {
        Self {
            model,
            params,
            prefix: "paraphrase: ".to_string(),
            end_marker: "</s>".to_string(),
        }
    }

    /// Override the instruction prefix and end marker
    pub fn with_shaping(mut self, prefix: impl Into<String>, end_marker: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.end_marker = end_marker.into();
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Model input for one sentence
    pub fn shape(&self, sentence: &str) -> String {
        if self.end_marker.is_empty() {
            format!("{}{}", self.prefix, sentence)
        } else {
            format!("{}{} {}", self.prefix, sentence, self.end_marker)
        }
    }

    /// Strip control tokens and an echoed instruction prefix
    pub fn decode(&self, raw: &str) -> String {
        let without_tokens = CONTROL_TOKEN_RE.replace_all(raw, " ");
        let collapsed = WHITESPACE_RE.replace_all(without_tokens.trim(), " ");

        let prefix = self.prefix.trim();
        let decoded = match collapsed.strip_prefix(prefix) {
            Some(rest) if !prefix.is_empty() => rest.trim_start(),
            _ => collapsed.as_ref(),
        };

        decoded.to_string()
    }
}

#[async_trait]
impl SentenceTransformer for NeuralTransformer {
    async fn transform(&self, sentence: &str) -> Result<String, HumaniseError> {
        let shaped = self.shape(sentence);
        debug!("Paraphrasing: {}", shaped);

        let raw = self.model.generate(&shaped, &self.params).await.map_err(|e| {
            error!("Paraphrase generation failed: {}", e);
            HumaniseError::from(e)
        })?;

        let decoded = self.decode(&raw);
        if decoded.is_empty() {
            error!("Paraphrase model returned no text for: {}", sentence);
            return Err(ProviderError::EmptyGeneration(sentence.to_string()).into());
        }

        Ok(decoded)
    }
}
