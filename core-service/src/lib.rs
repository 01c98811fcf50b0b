//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (key-value storage,
//! HTTP, clock) into the video URL cache. Desktop apps typically enable the
//! `desktop-shims` feature (which lets `core-runtime` fall back to
//! `bridge-desktop`), whereas WebAssembly builds enable the `wasm` feature
//! and rely on the adapters from `bridge-wasm`.
//!
//! ```ignore
//! use core_media::VideoCacheConfig;
//! use core_runtime::CoreConfig;
//! use core_service::CoreService;
//!
//! let runtime = CoreConfig::builder().build()?;
//! let core = CoreService::from_config(runtime, VideoCacheConfig::default())?;
//! core.init();
//!
//! let summary = core.prober().preload(&urls).await;
//! let plan = core.advisor().plan(&urls[0], None);
//!
//! core.dispose();
//! ```

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use bridge_traits::{Clock, HttpClient, KeyValueStore};
use core_media::{BatchProber, CacheStats, PlaybackAdvisor, VideoCacheConfig, VideoUrlCache};
use core_runtime::CoreConfig;
use tracing::info;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use bridge_wasm::WasmBridgeConfig;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
use bridge_wasm::{build_wasm_bridges, WasmBridgeSet};

/// Aggregated handle to all bridge dependencies the core requires.
pub struct CoreDependencies {
    pub storage: Arc<dyn KeyValueStore>,
    pub http_client: Arc<dyn HttpClient>,
    pub clock: Arc<dyn Clock>,
}

impl CoreDependencies {
    /// Construct a dependency bundle from explicit bridge handles.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        http_client: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            http_client,
            clock,
        }
    }
}

impl From<CoreConfig> for CoreDependencies {
    fn from(config: CoreConfig) -> Self {
        Self {
            storage: config.storage,
            http_client: config.http_client,
            clock: config.clock,
        }
    }
}

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
impl From<WasmBridgeSet> for CoreDependencies {
    fn from(set: WasmBridgeSet) -> Self {
        Self {
            storage: set.storage,
            http_client: set.http_client,
            clock: set.clock,
        }
    }
}

/// Primary façade exposed to host applications.
///
/// Owns the single shared [`VideoUrlCache`] of the session. Clones share it.
#[derive(Clone)]
pub struct CoreService {
    deps: Arc<CoreDependencies>,
    video_cache: Arc<VideoUrlCache>,
    prober: Arc<BatchProber>,
    advisor: PlaybackAdvisor,
}

impl CoreService {
    /// Create a new service from the provided dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Media`] if `cache_config` is invalid.
    pub fn new(deps: CoreDependencies, cache_config: VideoCacheConfig) -> Result<Self> {
        let deps = Arc::new(deps);
        let video_cache = Arc::new(VideoUrlCache::new(
            cache_config,
            Arc::clone(&deps.storage),
            Arc::clone(&deps.clock),
        )?);
        let prober = Arc::new(BatchProber::new(
            Arc::clone(&video_cache),
            Arc::clone(&deps.http_client),
        ));
        let advisor = PlaybackAdvisor::new(Arc::clone(&video_cache));

        Ok(Self {
            deps,
            video_cache,
            prober,
            advisor,
        })
    }

    /// Create a service from a validated runtime configuration.
    pub fn from_config(config: CoreConfig, cache_config: VideoCacheConfig) -> Result<Self> {
        config.validate().map_err(CoreError::from_runtime)?;
        Self::new(CoreDependencies::from(config), cache_config)
    }

    /// Desktop service with default bridges rooted under the platform data
    /// directory and the default cache configuration.
    #[cfg(feature = "desktop-shims")]
    pub fn with_defaults() -> Result<Self> {
        let config = CoreConfig::builder()
            .build()
            .map_err(CoreError::from_runtime)?;
        Self::from_config(config, VideoCacheConfig::default())
    }

    /// Load the persisted cache. Idempotent.
    pub fn init(&self) {
        self.video_cache.init();
        info!(
            entries = self.video_cache.len(),
            storage_key = %self.video_cache.config().storage_key,
            "Core service initialized"
        );
    }

    /// Flush the cache to storage and release the in-memory map.
    pub fn dispose(&self) {
        self.video_cache.dispose();
        info!("Core service disposed");
    }

    /// Access the bridge dependencies being used by the service.
    pub fn dependencies(&self) -> Arc<CoreDependencies> {
        Arc::clone(&self.deps)
    }

    pub fn video_cache(&self) -> Arc<VideoUrlCache> {
        Arc::clone(&self.video_cache)
    }

    pub fn prober(&self) -> Arc<BatchProber> {
        Arc::clone(&self.prober)
    }

    pub fn advisor(&self) -> &PlaybackAdvisor {
        &self.advisor
    }

    pub fn stats(&self) -> CacheStats {
        self.video_cache.stats()
    }
}

/// Convenience bootstrapper for WebAssembly hosts.
///
/// ```ignore
/// use core_media::VideoCacheConfig;
/// use core_service::{bootstrap_wasm, WasmBridgeConfig};
///
/// let core = bootstrap_wasm(WasmBridgeConfig::new("clinic"), VideoCacheConfig::default())?;
/// core.init();
/// ```
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub fn bootstrap_wasm(
    config: WasmBridgeConfig,
    cache_config: VideoCacheConfig,
) -> Result<CoreService> {
    let bridges = build_wasm_bridges(config)
        .map_err(|err| CoreError::InitializationFailed(err.to_string()))?;
    CoreService::new(CoreDependencies::from(bridges), cache_config)
}
