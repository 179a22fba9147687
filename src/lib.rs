/*!
 * # Humaniser
 *
 * A Rust library and HTTP service that rewrites a passage of prose one
 * sentence at a time so it reads less mechanically.
 *
 * ## Features
 *
 * - Rule-based English sentence splitting
 * - Two sentence transformation strategies:
 *   - Lexical: random WordNet synonym substitution
 *   - Neural: sequence-to-sequence paraphrasing through a model backend
 * - Order-preserving, bounded-concurrency orchestration
 * - JSON HTTP endpoint with permissive CORS
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Wiring configuration into a running pipeline
 * - `humanise`: The pipeline itself:
 *   - `humanise::splitter`: Sentence boundary detection
 *   - `humanise::core`: Passage orchestration
 *   - `humanise::lexical`: Synonym substitution
 *   - `humanise::neural`: Model paraphrasing
 * - `lexicon`: WordNet loading and synonym lookup
 * - `providers`: Client implementations for model backends:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::mock`: Scripted backend for tests
 * - `device`: Execution device selection
 * - `server`: axum router, handlers and API schema
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod device;
pub mod errors;
pub mod humanise;
pub mod lexicon;
pub mod providers;
pub mod server;

// Re-export main types for easier usage
pub use app_config::{Config, Strategy};
pub use app_controller::Controller;
pub use errors::{AppError, HumaniseError, LexiconError, ProviderError};
pub use humanise::Humaniser;
