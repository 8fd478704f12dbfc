//! Offline asset cache of the web front end.
//!
//! Install precaches a fixed manifest into one named cache; afterwards every
//! fetch is served from the cache when possible and from the network
//! otherwise. The cache name is the only versioning there is.

mod cache;

pub use cache::{
    AssetFetcher, AssetResponse, DEFAULT_CACHE_NAME, DEFAULT_MANIFEST, FetchSource, NetworkError,
    OfflineCache, ServedAsset,
};
