use super::record::ReviewDocument;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Where the review data lives: a local file or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataLocation {
    File(PathBuf),
    Remote(String),
}

impl DataLocation {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLocation::File(path) => write!(f, "{}", path.display()),
            DataLocation::Remote(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request for {location} failed: {source}")]
    Transport {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to load {location}: status {status}")]
    Status { location: String, status: u16 },
    #[error("{location} is not valid JSON: {source}")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the raw bytes behind a [`DataLocation`].
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch(&self, location: &DataLocation) -> Result<Vec<u8>, LoadError>;
}

/// Reads files from disk and fetches URLs with a single GET request.
#[derive(Debug, Clone, Default)]
pub struct HttpReviewSource {
    client: reqwest::Client,
}

impl HttpReviewSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewSource for HttpReviewSource {
    async fn fetch(&self, location: &DataLocation) -> Result<Vec<u8>, LoadError> {
        match location {
            DataLocation::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        location: location.to_string(),
                        source,
                    })
            }
            DataLocation::Remote(url) => {
                let transport = |source| LoadError::Transport {
                    location: location.to_string(),
                    source,
                };

                let response = self.client.get(url).send().await.map_err(transport)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        location: location.to_string(),
                        status: status.as_u16(),
                    });
                }

                let body = response.bytes().await.map_err(transport)?;
                Ok(body.to_vec())
            }
        }
    }
}

/// Parsed documents keyed by location.
///
/// An entry is written at most once and never evicted; failed loads are
/// not stored.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: Mutex<HashMap<DataLocation, Arc<ReviewDocument>>>,
}

impl FetchCache {
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Loads review documents through a [`ReviewSource`], caching each location.
#[derive(Debug, Default)]
pub struct ReviewLoader<S = HttpReviewSource> {
    source: S,
    cache: FetchCache,
}

impl<S: ReviewSource> ReviewLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: FetchCache::default(),
        }
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    pub async fn load(&self, location: &DataLocation) -> Result<Arc<ReviewDocument>, LoadError> {
        // Held across the fetch so concurrent callers never fetch twice.
        let mut entries = self.cache.entries.lock().await;
        if let Some(document) = entries.get(location) {
            debug!(%location, "serving review data from cache");
            return Ok(Arc::clone(document));
        }

        let bytes = self.source.fetch(location).await?;
        let document =
            ReviewDocument::from_slice(&bytes).map_err(|source| LoadError::Json {
                location: location.to_string(),
                source,
            })?;
        info!(%location, reviews = document.reviews.len(), "loaded review data");

        let document = Arc::new(document);
        entries.insert(location.clone(), Arc::clone(&document));
        Ok(document)
    }
}
