/*!
 * Locating and downloading the WordNet dictionary files.
 *
 * A configured directory is used when it already holds data files. Otherwise
 * the usual install locations are searched (`$WNHOME/dict`, distribution
 * packages), and as a last resort the files are fetched one by one from a
 * mirror of the WordNet `dict` directory.
 */

use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::PartOfSpeech;
use crate::errors::LexiconError;

/// Install locations searched after the configured directory
const SYSTEM_DIRS: &[&str] = &[
    "/usr/share/wordnet",
    "/usr/share/wordnet/dict",
    "/usr/local/share/wordnet",
    "/usr/local/WordNet-3.0/dict",
    "/opt/homebrew/share/wordnet",
];

/// Files fetched for each part of speech; `required` marks the ones a
/// download cannot do without
pub fn wordnet_files() -> Vec<(String, bool)> {
    PartOfSpeech::ALL
        .iter()
        .flat_map(|pos| {
            [
                (format!("data.{}", pos.file_suffix()), true),
                (format!("{}.exc", pos.file_suffix()), false),
            ]
        })
        .collect()
}

/// True when `dir` holds at least one `data.*` file
pub fn has_wordnet_data(dir: &Path) -> bool {
    PartOfSpeech::ALL
        .iter()
        .any(|pos| dir.join(format!("data.{}", pos.file_suffix())).is_file())
}

/// Directories to try, in order: the configured one, `$WNHOME`, then system paths
pub fn candidate_dirs(configured: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![configured.to_path_buf()];

    if let Some(home) = std::env::var_os("WNHOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join("dict"));
        dirs.push(home);
    }

    dirs.extend(SYSTEM_DIRS.iter().map(PathBuf::from));
    dirs
}

/// First directory among `candidates` that holds WordNet data
pub fn find_wordnet_dir<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    candidates.into_iter().find(|dir| {
        let found = has_wordnet_data(dir);
        debug!("WordNet candidate {:?}: {}", dir, if found { "found" } else { "absent" });
        found
    })
}

/// Resolve an installed WordNet starting from the configured directory
pub fn resolve_wordnet_dir(configured: &Path) -> Option<PathBuf> {
    find_wordnet_dir(candidate_dirs(configured))
}

/// Downloads the WordNet `dict` files from a mirror
#[derive(Debug, Clone)]
pub struct WordNetFetcher {
    client: Client,
    base_url: String,
}

impl WordNetFetcher {
    /// Create a fetcher for `base_url`, the URL of a `dict` directory
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder().timeout(timeout).build().unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download every dictionary file into `dest`, returning how many were written
    ///
    /// Data files must all be present on the mirror. Exception lists are
    /// skipped when the mirror answers 404.
    pub async fn fetch_into(&self, dest: &Path) -> Result<usize, LexiconError> {
        tokio::fs::create_dir_all(dest)
            .await
            .map_err(|source| LexiconError::Io {
                path: dest.to_path_buf(),
                source,
            })?;

        info!("Downloading WordNet from {} into {:?}", self.base_url, dest);

        let mut written = 0;
        for (file, required) in wordnet_files() {
            match self.fetch_file(&file).await? {
                Some(content) => {
                    let path = dest.join(&file);
                    tokio::fs::write(&path, content)
                        .await
                        .map_err(|source| LexiconError::Io { path, source })?;
                    debug!("Downloaded {}", file);
                    written += 1;
                }
                None if required => {
                    return Err(LexiconError::Download {
                        file,
                        reason: "not found on mirror".to_string(),
                    });
                }
                None => warn!("WordNet mirror has no {}, skipping", file),
            }
        }

        info!("Downloaded {} WordNet files", written);
        Ok(written)
    }

    // @returns: File body, or None when the mirror answers 404
    async fn fetch_file(&self, file: &str) -> Result<Option<Vec<u8>>, LexiconError> {
        let url = format!("{}/{}", self.base_url, file);
        let download_error = |reason: String| LexiconError::Download {
            file: file.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(download_error(format!("HTTP {}", status.as_u16())));
        }

        let body = response.bytes().await.map_err(|e| download_error(e.to_string()))?;
        Ok(Some(body.to_vec()))
    }
}
