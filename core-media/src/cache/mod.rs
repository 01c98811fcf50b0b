//! # Video URL Cache
//!
//! Remembers, per source URL, whether the media proxy could serve it, so the
//! player can skip known-broken videos and go straight to a YouTube
//! alternative.
//!
//! ## Overview
//!
//! - Keys derived from the source URL (`key`)
//! - Entries persisted to a single key-value slot (`store`)
//! - 24h expiry and a size bound with oldest-first eviction (`policy`)
//! - Read-only status lookups (`resolver`)
//! - Concurrency-bounded preloading through `HEAD` probes (`prober`)
//! - Aggregate counts (`stats`)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        BatchProber           │
//! │  - preload()                 │
//! │  - preload_with_progress()   │
//! └────────┬─────────────────────┘
//!          │
//!          ├──> HttpClient (HEAD via proxy)
//!          │
//! ┌────────▼─────────────────────┐
//! │        VideoUrlCache         │
//! │  - get() / set() / remove()  │
//! │  - resolve_url() / stats()   │
//! └────────┬─────────────────────┘
//!          │
//!          ├──> KeyValueStore (one slot)
//!          └──> Clock
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_media::cache::{BatchProber, VideoCacheConfig, VideoUrlCache};
//! use std::sync::Arc;
//!
//! let cache = Arc::new(VideoUrlCache::new(VideoCacheConfig::default(), storage, clock)?);
//! let prober = BatchProber::new(cache.clone(), http_client);
//!
//! let summary = prober.preload(&urls).await;
//! let stats = cache.stats();
//! println!("{} of {} probed URLs work", summary.succeeded, summary.probed());
//! ```

pub mod config;
pub mod entry;
pub mod key;
mod policy;
pub mod prober;
mod resolver;
pub mod stats;
pub mod store;

pub use config::{ProxyEndpoint, VideoCacheConfig, DEFAULT_PROXY_PATH, DEFAULT_STORAGE_KEY};
pub use entry::{CacheEntry, VideoStatus};
pub use key::{derive_key, CacheKey};
pub use prober::{BatchProber, PreloadProgress, PreloadSummary};
pub use stats::CacheStats;
pub use store::VideoUrlCache;
