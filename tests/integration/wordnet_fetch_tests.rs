/*!
 * WordNet download tests against a local stub mirror
 */

use anyhow::Result;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use humaniser::app_config::Config;
use humaniser::errors::LexiconError;
use humaniser::lexicon::{SynonymLookup, WordNet, WordNetFetcher};
use humaniser::Controller;

use crate::common::{self, DATA_ADJ, DATA_NOUN, DATA_VERB, VERB_EXC};

const DATA_ADV: &str = "00085811 02 r 01 rapidly 0 000 | with speed\n";

type Mirror = Arc<HashMap<String, String>>;

async fn serve_file(State(files): State<Mirror>, UrlPath(file): UrlPath<String>) -> (StatusCode, String) {
    match files.get(&file) {
        Some(content) => (StatusCode::OK, content.clone()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

fn full_mirror() -> HashMap<String, String> {
    [
        ("data.noun", DATA_NOUN),
        ("data.verb", DATA_VERB),
        ("data.adj", DATA_ADJ),
        ("data.adv", DATA_ADV),
        ("verb.exc", VERB_EXC),
    ]
    .into_iter()
    .map(|(name, content)| (name.to_string(), content.to_string()))
    .collect()
}

/// Start a mirror on an ephemeral port and return its `dict` URL
async fn start_mirror(files: HashMap<String, String>) -> String {
    let app = Router::new()
        .route("/dict/{file}", get(serve_file))
        .with_state(Arc::new(files));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/dict/", address)
}

#[tokio::test]
async fn test_fetchInto_fullMirror_shouldWriteLoadableDictionary() -> Result<()> {
    let url = start_mirror(full_mirror()).await;
    let dir = common::create_temp_dir()?;
    let dest = dir.path().join("wordnet");

    let fetcher = WordNetFetcher::new(url, Duration::from_secs(5));
    let written = fetcher.fetch_into(&dest).await?;

    // Three exception lists are absent from the mirror
    assert_eq!(written, 5);
    assert!(!dest.join("noun.exc").exists());

    let wordnet = WordNet::load(&dest)?;
    assert!(wordnet.sense_count() > 0);
    Ok(())
}

#[tokio::test]
async fn test_fetchInto_missingDataFile_shouldFail() -> Result<()> {
    let mut files = full_mirror();
    files.remove("data.adv");
    let url = start_mirror(files).await;
    let dir = common::create_temp_dir()?;

    let fetcher = WordNetFetcher::new(url, Duration::from_secs(5));
    let result = fetcher.fetch_into(dir.path()).await;

    assert!(matches!(result, Err(LexiconError::Download { ref file, .. }) if file == "data.adv"));
    Ok(())
}

#[tokio::test]
async fn test_fetchInto_unreachableMirror_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let fetcher = WordNetFetcher::new("http://127.0.0.1:1/dict", Duration::from_secs(2));

    let result = fetcher.fetch_into(dir.path()).await;
    assert!(matches!(result, Err(LexiconError::Download { .. })));
    Ok(())
}

/// A fresh install downloads WordNet on first use and substitutes words
#[tokio::test]
async fn test_humaniseOnce_freshInstall_shouldDownloadAndSubstitute() -> Result<()> {
    common::init_test_logging();
    let url = start_mirror(full_mirror()).await;
    let dir = common::create_temp_dir()?;
    let wordnet_dir = dir.path().join("wordnet");

    let mut config = Config::default();
    config.lexical.wordnet_dir = wordnet_dir.to_str().unwrap().to_string();
    config.lexical.wordnet_url = url;
    config.lexical.search_system_dirs = false;
    config.lexical.substitution_probability = 1.0;
    config.pipeline.seed = Some(7);
    let controller = Controller::with_config(config)?;

    let passage = "The quick dog can jump high.";
    let output = controller.humanise_once(passage).await?;

    assert!(wordnet_dir.join("data.noun").is_file());
    assert_ne!(output, passage);
    assert!(output.starts_with("The "));
    assert!(output.ends_with(" high."));
    Ok(())
}

#[tokio::test]
async fn test_prepareWordnet_downloadDisabled_shouldNotTouchDirectory() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let wordnet_dir = dir.path().join("wordnet");

    let mut config = Config::default();
    config.lexical.wordnet_dir = wordnet_dir.to_str().unwrap().to_string();
    config.lexical.search_system_dirs = false;
    config.lexical.auto_download = false;
    let controller = Controller::with_config(config)?;

    assert_eq!(controller.prepare_wordnet().await, wordnet_dir);
    assert!(!wordnet_dir.exists());
    Ok(())
}
