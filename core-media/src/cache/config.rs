//! Cache configuration and the proxy endpoint used for probes

use crate::error::{MediaError, Result};
use std::time::Duration;

/// Storage slot holding the persisted cache.
pub const DEFAULT_STORAGE_KEY: &str = "exercise-video-cache";

/// Same-origin path of the allow-listed media proxy.
pub const DEFAULT_PROXY_PATH: &str = "/api/video-proxy";

/// Configuration for [`VideoUrlCache`](super::VideoUrlCache) and
/// [`BatchProber`](super::BatchProber).
#[derive(Debug, Clone)]
pub struct VideoCacheConfig {
    /// Name of the persistent slot (default: `exercise-video-cache`)
    pub storage_key: String,

    /// Validity window of every entry (default: 24h)
    pub ttl: Duration,

    /// Size bound that triggers a trim (default: 1000)
    pub max_entries: usize,

    /// Fraction of `max_entries` kept after a trim (default: 0.8)
    pub trim_ratio: f64,

    /// URLs probed concurrently per batch (default: 10)
    pub batch_size: usize,

    /// Time budget of a single probe (default: 5s)
    pub probe_timeout: Duration,

    /// Pause between consecutive batches (default: 100ms)
    pub batch_delay: Duration,

    /// Where probes are sent
    pub proxy: ProxyEndpoint,
}

impl Default for VideoCacheConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ttl: Duration::from_secs(24 * 60 * 60),
            max_entries: 1000,
            trim_ratio: 0.8,
            batch_size: 10,
            probe_timeout: Duration::from_secs(5),
            batch_delay: Duration::from_millis(100),
            proxy: ProxyEndpoint::default(),
        }
    }
}

impl VideoCacheConfig {
    /// Create a new cache configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn with_trim_ratio(mut self, ratio: f64) -> Self {
        self.trim_ratio = ratio;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyEndpoint) -> Self {
        self.proxy = proxy;
        self
    }

    /// Number of entries kept when the size bound is exceeded.
    pub fn trim_target(&self) -> usize {
        (self.max_entries as f64 * self.trim_ratio).floor() as usize
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(MediaError::InvalidConfig(
                "storage_key cannot be empty".to_string(),
            ));
        }

        if self.ttl.is_zero() {
            return Err(MediaError::InvalidConfig(
                "ttl must be greater than 0".to_string(),
            ));
        }

        if chrono::Duration::from_std(self.ttl).is_err() {
            return Err(MediaError::InvalidConfig("ttl is out of range".to_string()));
        }

        if self.max_entries == 0 {
            return Err(MediaError::InvalidConfig(
                "max_entries must be at least 1".to_string(),
            ));
        }

        if !(self.trim_ratio > 0.0 && self.trim_ratio <= 1.0) {
            return Err(MediaError::InvalidConfig(format!(
                "trim_ratio must be in (0, 1], got {}",
                self.trim_ratio
            )));
        }

        if self.trim_target() == 0 {
            return Err(MediaError::InvalidConfig(format!(
                "max_entries {} with trim_ratio {} keeps no entries after a trim",
                self.max_entries, self.trim_ratio
            )));
        }

        if self.batch_size == 0 {
            return Err(MediaError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }

        if self.probe_timeout.is_zero() {
            return Err(MediaError::InvalidConfig(
                "probe_timeout must be greater than 0".to_string(),
            ));
        }

        self.proxy.validate()
    }
}

/// The same-origin proxy that fetches allow-listed remote media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    /// Scheme and host prefixed to probe requests, e.g. `https://clinic.example.com`.
    /// `None` keeps probe URLs relative, which only browser hosts can resolve.
    pub origin: Option<String>,

    /// Path of the proxy route (default: `/api/video-proxy`)
    pub path: String,
}

impl Default for ProxyEndpoint {
    fn default() -> Self {
        Self {
            origin: None,
            path: DEFAULT_PROXY_PATH.to_string(),
        }
    }
}

impl ProxyEndpoint {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Relative proxy URL for `url`, as stored in cache entries and handed to
    /// the player.
    pub fn proxy_url(&self, url: &str) -> String {
        format!("{}?url={}", self.path, urlencoding::encode(url))
    }

    /// Absolute URL the probe request is sent to.
    pub fn probe_url(&self, url: &str) -> String {
        match &self.origin {
            Some(origin) => format!("{}{}", origin.trim_end_matches('/'), self.proxy_url(url)),
            None => self.proxy_url(url),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(MediaError::InvalidConfig(format!(
                "proxy path must start with '/', got {:?}",
                self.path
            )));
        }
        Ok(())
    }
}
