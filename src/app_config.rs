use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::providers::GenerationParams;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Sentence transformation strategy
    #[serde(default)]
    pub strategy: Strategy,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Orchestrator settings shared by both strategies
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Lexical (synonym substitution) settings
    #[serde(default)]
    pub lexical: LexicalConfig,

    /// Neural (paraphrase model) settings
    #[serde(default)]
    pub neural: NeuralConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Sentence transformation strategy
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    // @strategy: Random synonym substitution
    #[default]
    Lexical,
    // @strategy: Sequence-to-sequence paraphrase model
    Neural,
}

impl Strategy {
    // @returns: Capitalized strategy name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Lexical => "Lexical",
            Self::Neural => "Neural",
        }
    }

    // @returns: Lowercase strategy identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Lexical => "lexical".to_string(),
            Self::Neural => "neural".to_string(),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lexical" => Ok(Self::Lexical),
            "neural" => Ok(Self::Neural),
            _ => Err(anyhow!("Invalid strategy: {}", s)),
        }
    }
}

/// Requested execution device for the neural model
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceChoice {
    /// Pick the accelerator when one is present
    #[default]
    Auto,
    /// Force general-purpose CPU execution
    Cpu,
    /// Force accelerated execution
    Gpu,
}

impl std::str::FromStr for DeviceChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "cpu" => Ok(Self::Cpu),
            "gpu" | "cuda" | "accelerated" => Ok(Self::Gpu),
            _ => Err(anyhow!("Invalid device: {}", s)),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for one humanise request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Orchestrator configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineConfig {
    /// How many sentences of one passage may be transformed at once
    #[serde(default = "default_max_concurrent_sentences")]
    pub max_concurrent_sentences: usize,

    /// Seed for the random source; unseeded runs use the thread RNG
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_sentences: default_max_concurrent_sentences(),
            seed: None,
        }
    }
}

/// Lexical strategy configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LexicalConfig {
    /// Directory holding the WordNet `data.*` and `*.exc` files
    #[serde(default = "default_wordnet_dir")]
    pub wordnet_dir: String,

    /// Probability that any single token is considered for substitution
    #[serde(default = "default_substitution_probability")]
    pub substitution_probability: f64,

    /// Look for an installed WordNet (`$WNHOME`, system packages) when
    /// `wordnet_dir` holds no data
    #[serde(default = "default_true")]
    pub search_system_dirs: bool,

    /// Download WordNet into `wordnet_dir` when no installed copy is found
    #[serde(default = "default_true")]
    pub auto_download: bool,

    /// URL of a WordNet `dict` directory mirror
    #[serde(default = "default_wordnet_url")]
    pub wordnet_url: String,

    /// Timeout for each dictionary file download, in seconds
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            wordnet_dir: default_wordnet_dir(),
            substitution_probability: default_substitution_probability(),
            search_system_dirs: true,
            auto_download: true,
            wordnet_url: default_wordnet_url(),
            download_timeout_secs: default_download_timeout_secs(),
        }
    }
}

/// Neural strategy configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NeuralConfig {
    /// Generation backend URL
    #[serde(default = "default_neural_endpoint")]
    pub endpoint: String,

    /// Model name as known to the backend
    #[serde(default = "default_neural_model")]
    pub model: String,

    /// Instruction marker prepended to every sentence
    #[serde(default = "default_instruction_prefix")]
    pub instruction_prefix: String,

    /// End-of-sequence marker appended to every sentence
    #[serde(default = "default_end_marker")]
    pub end_marker: String,

    /// Maximum number of generated tokens
    #[serde(default = "default_max_length")]
    pub max_length: u32,

    /// Top-k sampling cutoff
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Sample instead of greedy decoding
    #[serde(default = "default_true")]
    pub do_sample: bool,

    /// Stop as soon as the end marker is produced
    #[serde(default = "default_true")]
    pub early_stopping: bool,

    /// Backend request timeout in seconds
    #[serde(default = "default_neural_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for network and server errors
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Requested execution device
    #[serde(default)]
    pub device: DeviceChoice,
}

impl Default for NeuralConfig {
    fn default() -> Self {
        Self {
            endpoint: default_neural_endpoint(),
            model: default_neural_model(),
            instruction_prefix: default_instruction_prefix(),
            end_marker: default_end_marker(),
            max_length: default_max_length(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            do_sample: true,
            early_stopping: true,
            timeout_secs: default_neural_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            device: DeviceChoice::default(),
        }
    }
}

impl NeuralConfig {
    /// Sampling settings for one paraphrase call
    pub fn generation_params(&self, seed: Option<u64>) -> GenerationParams {
        let stop_sequences = if self.early_stopping && !self.end_marker.is_empty() {
            vec![self.end_marker.clone()]
        } else {
            Vec::new()
        };

        GenerationParams {
            max_length: self.max_length,
            do_sample: self.do_sample,
            top_k: self.top_k,
            top_p: self.top_p,
            stop_sequences,
            num_return_sequences: 1,
            seed,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_max_concurrent_sentences() -> usize {
    4
}

fn default_wordnet_dir() -> String {
    "wordnet".to_string()
}

fn default_wordnet_url() -> String {
    "https://unpkg.com/wordnet-db@3.1.14/dict".to_string()
}

fn default_download_timeout_secs() -> u64 {
    300
}

fn default_substitution_probability() -> f64 {
    0.3
}

fn default_neural_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_neural_model() -> String {
    "t5-paraphrase".to_string()
}

fn default_instruction_prefix() -> String {
    "paraphrase: ".to_string()
}

fn default_end_marker() -> String {
    "</s>".to_string()
}

fn default_max_length() -> u32 {
    256
}

fn default_top_k() -> u32 {
    120
}

fn default_top_p() -> f32 {
    0.95
}

fn default_neural_timeout_secs() -> u64 {
    120
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the configuration file, writing a default one when it does not exist
    pub fn load_or_create(config_path: &str) -> Result<Self> {
        if Path::new(config_path).exists() {
            let file = File::open(config_path)
                .context(format!("Failed to open config file: {}", config_path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", config_path))?;

            Ok(config)
        } else {
            warn!("Config file not found at '{}', creating default config.", config_path);

            let config = Config::default();
            let config_json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config to JSON")?;

            std::fs::write(config_path, config_json)
                .context(format!("Failed to write default config to file: {}", config_path))?;

            Ok(config)
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let probability = self.lexical.substitution_probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(anyhow!(
                "Substitution probability must be between 0 and 1, got {}",
                probability
            ));
        }

        if self.lexical.auto_download {
            Url::parse(&self.lexical.wordnet_url)
                .map_err(|e| anyhow!("Invalid WordNet URL '{}': {}", self.lexical.wordnet_url, e))?;
        }

        if self.pipeline.max_concurrent_sentences == 0 {
            return Err(anyhow!("max_concurrent_sentences must be at least 1"));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be at least 1"));
        }

        if self.strategy == Strategy::Neural {
            let neural = &self.neural;
            if neural.model.trim().is_empty() {
                return Err(anyhow!("A model name is required for the neural strategy"));
            }
            if neural.endpoint.trim().is_empty() {
                return Err(anyhow!("An endpoint is required for the neural strategy"));
            }
            let endpoint = if neural.endpoint.contains("://") {
                neural.endpoint.clone()
            } else {
                format!("http://{}", neural.endpoint)
            };
            let parsed = Url::parse(&endpoint)
                .map_err(|e| anyhow!("Invalid neural endpoint '{}': {}", neural.endpoint, e))?;
            if parsed.host_str().is_none() {
                return Err(anyhow!("Neural endpoint '{}' has no host", neural.endpoint));
            }
            if neural.top_k == 0 {
                return Err(anyhow!("top_k must be at least 1"));
            }
            if !(neural.top_p > 0.0 && neural.top_p <= 1.0) {
                return Err(anyhow!("top_p must be in (0, 1], got {}", neural.top_p));
            }
            if neural.max_length == 0 {
                return Err(anyhow!("max_length must be at least 1"));
            }
        }

        Ok(())
    }
}
