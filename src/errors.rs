/*!
 * Error types for the humaniser application.
 *
 * This module contains custom error types for the different layers of the
 * application, using the thiserror crate for ergonomic error definitions.
 * The HTTP layer never exposes these messages; it maps them to a single
 * generic failure (see `server::error`).
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when talking to a generation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The model produced nothing usable once control tokens were removed
    #[error("Model produced an empty generation for input: {0}")]
    EmptyGeneration(String),
}

/// Errors raised while loading the lexical database
#[derive(Error, Debug)]
pub enum LexiconError {
    /// A database file could not be read
    #[error("Failed to read lexicon file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A database line did not match the expected layout
    #[error("Malformed lexicon entry in {file} at line {line}: {reason}")]
    Malformed {
        /// File name
        file: String,
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// The directory holds none of the expected data files
    #[error("No lexicon data files found in {0}")]
    MissingData(PathBuf),

    /// A dictionary file could not be downloaded
    #[error("Failed to download lexicon file {file}: {reason}")]
    Download {
        /// File name on the mirror
        file: String,
        /// What went wrong
        reason: String,
    },
}

/// Errors that can occur while humanising a passage
#[derive(Error, Debug)]
pub enum HumaniseError {
    /// Error from the generation backend
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The sentence splitter failed
    #[error("Sentence splitting failed: {0}")]
    Splitter(String),

    /// A sentence transformer failed for another reason
    #[error("Sentence transformation failed: {0}")]
    Transform(String),

    /// The pipeline did not finish within the allotted time
    #[error("Humanisation timed out after {0} seconds")]
    Timeout(u64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the lexical database
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Error from the generation backend
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the humanisation pipeline
    #[error("Humanise error: {0}")]
    Humanise(#[from] HumaniseError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
