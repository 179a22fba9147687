/*!
 * Generation backends for the neural paraphrase strategy.
 *
 * This module contains client implementations for model-serving backends:
 * - Ollama: local model server exposing `/api/generate`
 * - Mock: in-process backend with scripted behaviors for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Sampling settings for one generation call, independent of any backend
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Maximum number of generated tokens
    pub max_length: u32,
    /// Sample from the distribution instead of greedy decoding
    pub do_sample: bool,
    /// Keep only the k most likely tokens at each step
    pub top_k: u32,
    /// Nucleus sampling threshold
    pub top_p: f32,
    /// Sequences that end generation as soon as they are produced
    pub stop_sequences: Vec<String>,
    /// Number of sequences to return; the pipeline always asks for one
    pub num_return_sequences: u32,
    /// Fixed seed for reproducible sampling
    pub seed: Option<u64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 256,
            do_sample: true,
            top_k: 120,
            top_p: 0.95,
            stop_sequences: vec!["</s>".to_string()],
            num_return_sequences: 1,
            seed: None,
        }
    }
}

/// Common trait for all generation backends
///
/// This trait defines the interface that all backend implementations must follow,
/// allowing them to be used interchangeably behind the neural transformer.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Build a backend request for an already shaped prompt
    fn build_request(&self, prompt: &str, params: &GenerationParams) -> Self::Request;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Load the model ahead of the first request so it stays resident
    async fn warm_up(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text
    fn extract_text(response: &Self::Response) -> String;
}

pub mod mock;
pub mod ollama;
