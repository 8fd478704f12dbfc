use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{PlotError, PlotResult};

pub const DEFAULT_CACHE_NAME: &str = "plot-controller-pwa";

/// Root document, script bundle, engine binary and favicon.
pub const DEFAULT_MANIFEST: [&str; 5] = [
    "./",
    "./index.html",
    "./plot_controller.js",
    "./plot_controller_bg.wasm",
    "./favicon.ico",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetResponse {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl AssetResponse {
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NetworkError(pub String);

/// Network side of the cache.
pub trait AssetFetcher {
    fn fetch(&mut self, path: &str) -> Result<AssetResponse, NetworkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchSource {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedAsset {
    pub source: FetchSource,
    pub response: AssetResponse,
}

/// Named, insertion-ordered cache of static assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineCache {
    name: String,
    manifest: Vec<String>,
    entries: IndexMap<String, AssetResponse>,
}

impl OfflineCache {
    #[must_use]
    pub fn new<I, P>(name: impl Into<String>, manifest: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            manifest: manifest.into_iter().map(Into::into).collect(),
            entries: IndexMap::new(),
        }
    }

    /// Fetches every manifest entry and stores them all.
    ///
    /// All or nothing: if one fetch fails, the cache keeps its previous
    /// content.
    pub fn install(&mut self, fetcher: &mut impl AssetFetcher) -> PlotResult<usize> {
        let mut staged = IndexMap::with_capacity(self.manifest.len());
        for path in &self.manifest {
            let response = fetcher.fetch(path).map_err(|err| {
                warn!(cache = %self.name, path = %path, error = %err, "precache failed");
                PlotError::AssetFetch {
                    cache: self.name.clone(),
                    path: path.clone(),
                    reason: err.to_string(),
                }
            })?;
            staged.insert(path.clone(), response);
        }

        let count = staged.len();
        self.entries.extend(staged);
        info!(cache = %self.name, assets = count, "offline cache installed");
        Ok(count)
    }

    /// Cache first, network otherwise. Network responses are not stored.
    pub fn fetch(
        &self,
        fetcher: &mut impl AssetFetcher,
        path: &str,
    ) -> Result<ServedAsset, NetworkError> {
        if let Some(response) = self.entries.get(path) {
            debug!(cache = %self.name, path, "served from cache");
            return Ok(ServedAsset {
                source: FetchSource::Cache,
                response: response.clone(),
            });
        }

        let response = fetcher.fetch(path)?;
        Ok(ServedAsset {
            source: FetchSource::Network,
            response,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn manifest(&self) -> &[String] {
        &self.manifest
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn cached_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for OfflineCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_NAME, DEFAULT_MANIFEST)
    }
}
