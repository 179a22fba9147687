use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{Config, Strategy};
use crate::device::Device;
use crate::humanise::{
    Humaniser, LexicalTransformer, NeuralTransformer, ParaphraseModel, RandomSource, RuleSplitter,
    SeededRandom, ThreadRandom,
};
use crate::lexicon::{self, SynonymLookup, WordNetFetcher};
use crate::providers::ollama::Ollama;
use crate::providers::Provider;
use crate::server::{build_router, AppState};

// @module: Application controller wiring configuration to the pipeline

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Random source for the lexical strategy, seeded when configured
    pub fn random_source(&self) -> Arc<dyn RandomSource> {
        match self.config.pipeline.seed {
            Some(seed) => {
                info!("Using seeded random source ({})", seed);
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(ThreadRandom),
        }
    }

    /// Build the pipeline for the configured strategy
    pub async fn build_humaniser(&self) -> Result<Humaniser> {
        match self.config.strategy {
            Strategy::Lexical => {
                let wordnet_dir = self.prepare_wordnet().await;
                let lexicon = lexicon::load_lexicon(&wordnet_dir);
                Ok(self.lexical_humaniser(lexicon))
            }
            Strategy::Neural => {
                let model = self.connect_model().await?;
                Ok(self.neural_humaniser(model))
            }
        }
    }

    /// Directory to load WordNet from, downloading it when nothing is installed
    ///
    /// A failed download is logged and the configured directory is returned,
    /// so the lexical strategy degrades to identity instead of refusing to start.
    pub async fn prepare_wordnet(&self) -> PathBuf {
        let lexical = &self.config.lexical;
        let configured = Path::new(&lexical.wordnet_dir);
        let installed = if lexical.search_system_dirs {
            lexicon::resolve_wordnet_dir(configured)
        } else {
            lexicon::provision::find_wordnet_dir([configured.to_path_buf()])
        };
        if let Some(dir) = installed {
            return dir;
        }

        if !lexical.auto_download {
            warn!(
                "WordNet not found in {:?} and automatic download is disabled",
                configured
            );
            return configured.to_path_buf();
        }

        if let Err(e) = self.fetch_wordnet().await {
            warn!("WordNet download failed: {}", e);
        }
        configured.to_path_buf()
    }

    /// Download WordNet into the configured directory
    pub async fn fetch_wordnet(&self) -> Result<usize> {
        let lexical = &self.config.lexical;
        let fetcher = WordNetFetcher::new(
            &lexical.wordnet_url,
            Duration::from_secs(lexical.download_timeout_secs),
        );

        let written = fetcher
            .fetch_into(Path::new(&lexical.wordnet_dir))
            .await
            .with_context(|| format!("Failed to download WordNet from {}", fetcher.base_url()))?;
        Ok(written)
    }

    /// Lexical pipeline over an already loaded lexicon
    pub fn lexical_humaniser(&self, lexicon: Arc<dyn SynonymLookup>) -> Humaniser {
        let transformer = LexicalTransformer::new(lexicon, self.random_source())
            .with_probability(self.config.lexical.substitution_probability);

        Humaniser::new(Arc::new(RuleSplitter), Arc::new(transformer))
            .with_max_concurrent(self.config.pipeline.max_concurrent_sentences)
    }

    /// Neural pipeline over an already constructed model handle
    pub fn neural_humaniser(&self, model: Arc<dyn ParaphraseModel>) -> Humaniser {
        let neural = &self.config.neural;
        let transformer = NeuralTransformer::new(model, neural.generation_params(self.config.pipeline.seed))
            .with_shaping(neural.instruction_prefix.clone(), neural.end_marker.clone());

        Humaniser::new(Arc::new(RuleSplitter), Arc::new(transformer))
            .with_max_concurrent(self.config.pipeline.max_concurrent_sentences)
    }

    /// Select the device, connect to the backend and keep the model loaded
    async fn connect_model(&self) -> Result<Arc<dyn ParaphraseModel>> {
        let neural = &self.config.neural;
        let device = Device::select(neural.device);

        let ollama = Ollama::new_with_config(
            &neural.endpoint,
            &neural.model,
            device,
            Duration::from_secs(neural.timeout_secs),
            neural.retry_count,
            neural.retry_backoff_ms,
        );

        ollama
            .test_connection()
            .await
            .with_context(|| format!("Failed to reach model backend at {}", ollama.base_url()))?;

        info!("Loading paraphrase model '{}'", ollama.model());
        if let Err(e) = ollama.warm_up().await {
            warn!("Model warm-up failed, first request will load it: {}", e);
        }

        Ok(Arc::new(ollama))
    }

    /// Humanise a single passage with the configured pipeline
    pub async fn humanise_once(&self, text: &str) -> Result<String> {
        let humaniser = self.build_humaniser().await?;
        let output = humaniser.humanise(text).await?;
        Ok(output)
    }

    /// Router state for an already built pipeline
    pub fn app_state(&self, humaniser: Humaniser) -> AppState {
        AppState::new(
            humaniser,
            self.config.strategy,
            Duration::from_secs(self.config.server.request_timeout_secs),
        )
    }

    /// Build the pipeline and serve the HTTP API until shutdown
    pub async fn serve(&self) -> Result<()> {
        let humaniser = self.build_humaniser().await?;
        let app = build_router(self.app_state(humaniser));

        let address = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {}", address))?;

        info!(
            "Humaniser listening on http://{} ({} strategy)",
            address,
            self.config.strategy.display_name()
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated unexpectedly")?;

        info!("Humaniser stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
