//! Shared application state for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Strategy;
use crate::humanise::Humaniser;

/// State cloned into every handler.
///
/// The pipeline is read-only once built, so it is shared behind an `Arc`
/// without a lock.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The configured pipeline
    pub humaniser: Arc<Humaniser>,
    /// Strategy the pipeline was built with
    pub strategy: Strategy,
    /// Upper bound for a single humanise call
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(humaniser: Humaniser, strategy: Strategy, request_timeout: Duration) -> Self {
        Self {
            humaniser: Arc::new(humaniser),
            strategy,
            request_timeout,
        }
    }
}
