//! # Core Configuration Module
//!
//! Provides configuration management for the clinic media core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds the platform bridges the core needs. It enforces
//! fail-fast validation so missing capabilities surface at startup rather than
//! on the first cache write.
//!
//! ## Dependencies
//!
//! - `KeyValueStore` - Persistent slot storage (desktop default: one file per slot)
//! - `HttpClient` - Probe transport (desktop default: reqwest)
//! - `Clock` - Time source (default: system clock on every platform)
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults for
//! `KeyValueStore` and `HttpClient` are injected automatically if not provided.
//!
//! ## Usage
//!
//! ### Configuration with Desktop Defaults
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .data_dir("/path/to/app-data")
//!     .build()?;
//! ```
//!
//! ### Configuration with Custom Bridges
//!
//! ```ignore
//! use bridge_traits::{ManualClock, MemoryStore};
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .storage(Arc::new(MemoryStore::new()))
//!     .http_client(Arc::new(MyHttpClient))
//!     .clock(Arc::new(ManualClock::at_millis(0)))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{Clock, HttpClient, KeyValueStore, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

/// Core configuration for the clinic media core.
///
/// Holds the bridges required to initialize the core. Use
/// [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Persistent slot storage
    pub storage: Arc<dyn KeyValueStore>,

    /// HTTP client used for media probes
    pub http_client: Arc<dyn HttpClient>,

    /// Time source for expiry decisions
    pub clock: Arc<dyn Clock>,

    /// Directory backing the default desktop store, when one was used
    pub data_dir: Option<PathBuf>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("storage", &"KeyValueStore { ... }")
            .field("http_client", &"HttpClient { ... }")
            .field("clock", &"Clock { ... }")
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core_runtime::config::CoreConfig;
    ///
    /// let builder = CoreConfig::builder();
    /// ```
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::Config("Data directory cannot be empty".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn storage_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "KeyValueStore".to_string(),
        message: "KeyValueStore implementation is required for cache persistence. \
                 Desktop: ensure the 'desktop-shims' feature is enabled \
                 to use the default FileKeyValueStore. \
                 Web: inject WasmLocalStore."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required for media probes. \
                 Desktop: ensure the 'desktop-shims' feature is enabled \
                 to use the default ReqwestHttpClient. \
                 Web: inject WasmHttpClient."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_storage(data_dir: Option<&PathBuf>) -> Result<Arc<dyn KeyValueStore>> {
    use bridge_desktop::FileKeyValueStore;

    let store = match data_dir {
        Some(dir) => FileKeyValueStore::with_directory(dir.join("kv")),
        None => FileKeyValueStore::new(),
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_storage(_data_dir: Option<&PathBuf>) -> Result<Arc<dyn KeyValueStore>> {
    Err(storage_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](CoreConfigBuilder::build) to create the final config.
#[derive(Default)]
pub struct CoreConfigBuilder {
    storage: Option<Arc<dyn KeyValueStore>>,
    http_client: Option<Arc<dyn HttpClient>>,
    clock: Option<Arc<dyn Clock>>,
    data_dir: Option<PathBuf>,
}

impl CoreConfigBuilder {
    /// Sets the key-value store used for persistence.
    pub fn storage(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(store);
        self
    }

    /// Sets the HTTP client used for probes.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the time source. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the directory the default desktop store writes under.
    ///
    /// Ignored when a store is injected with [`storage`](Self::storage).
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::CoreConfig;
    ///
    /// let builder = CoreConfig::builder()
    ///     .data_dir("/path/to/app-data");
    /// ```
    pub fn data_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityMissing`] when storage or the HTTP client
    /// is absent and no platform default is compiled in, and
    /// [`Error::Config`] when a value is invalid.
    pub fn build(self) -> Result<CoreConfig> {
        let storage = match self.storage {
            Some(store) => store,
            None => provide_default_storage(self.data_dir.as_ref())?,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        let config = CoreConfig {
            storage,
            http_client,
            clock,
            data_dir: self.data_dir,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::{HttpRequest, HttpResponse, ManualClock, MemoryStore};

    struct NoopHttpClient;

    #[async_trait]
    impl HttpClient for NoopHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Ok(HttpResponse::with_status(200))
        }
    }

    fn injected() -> CoreConfigBuilder {
        CoreConfig::builder()
            .storage(Arc::new(MemoryStore::new()))
            .http_client(Arc::new(NoopHttpClient))
    }

    #[test]
    fn test_builder_with_injected_bridges() {
        let config = injected().build().unwrap();
        config.storage.set_item("slot", "value").unwrap();
        assert_eq!(
            config.storage.get_item("slot").unwrap().as_deref(),
            Some("value")
        );
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_clock_defaults_to_system_time() {
        let config = injected().build().unwrap();
        assert!(config.clock.unix_timestamp() > 1_600_000_000);
    }

    #[test]
    fn test_injected_clock_is_kept() {
        let config = injected()
            .clock(Arc::new(ManualClock::at_millis(5_000)))
            .build()
            .unwrap();
        assert_eq!(config.clock.unix_timestamp_millis(), 5_000);
    }

    #[test]
    fn test_validate_rejects_empty_data_dir() {
        let result = injected().data_dir("").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_storage() {
        let result = CoreConfig::builder()
            .http_client(Arc::new(NoopHttpClient))
            .build();
        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "KeyValueStore")
            }
            other => panic!("expected missing storage, got {other:?}"),
        }
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_http_client() {
        let result = CoreConfig::builder()
            .storage(Arc::new(MemoryStore::new()))
            .build();
        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "HttpClient")
            }
            other => panic!("expected missing http client, got {other:?}"),
        }
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_build_with_desktop_defaults() {
        let base =
            std::env::temp_dir().join(format!("core-runtime-test-{}", uuid::Uuid::new_v4()));

        let config = CoreConfig::builder()
            .data_dir(&base)
            .build()
            .expect("desktop defaults should succeed");

        config.storage.set_item("exercise-video-cache", "{}").unwrap();
        assert_eq!(
            config
                .storage
                .get_item("exercise-video-cache")
                .unwrap()
                .as_deref(),
            Some("{}")
        );
        assert!(base.join("kv").exists());

        drop(config);
        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = injected().build().unwrap();
        let cloned = config.clone();
        cloned.storage.set_item("k", "v").unwrap();
        assert_eq!(config.storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
