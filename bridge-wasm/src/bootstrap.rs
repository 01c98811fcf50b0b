//! Convenience helpers for wiring all wasm bridge implementations together.
//!
//! Host shells can use [`build_wasm_bridges`] to construct the HTTP, storage,
//! and clock adapters without writing repetitive glue code. The result mirrors
//! the role that the `bridge-desktop` crate plays for native targets.

use std::sync::Arc;

use bridge_traits::{
    error::Result as BridgeResult,
    http::HttpClient,
    storage::KeyValueStore,
    time::{Clock, SystemClock},
};

use crate::{http::WasmHttpClient, storage::WasmLocalStore};

/// Configuration for [`build_wasm_bridges`].
#[derive(Debug, Clone, Default)]
pub struct WasmBridgeConfig {
    /// Optional `localStorage` key prefix. Empty means slots are stored
    /// under their plain names.
    pub namespace: String,
}

impl WasmBridgeConfig {
    /// Create a new config using the provided namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

/// Fully constructed wasm bridge objects ready for injection into the core.
pub struct WasmBridgeSet {
    /// HTTP client powered by browser `fetch`.
    pub http_client: Arc<dyn HttpClient>,
    /// Key-value store layered on `localStorage`.
    pub storage: Arc<dyn KeyValueStore>,
    /// Wall clock.
    pub clock: Arc<dyn Clock>,
}

impl WasmBridgeSet {
    /// Convenience accessor to clone the HTTP client.
    pub fn http(&self) -> Arc<dyn HttpClient> {
        Arc::clone(&self.http_client)
    }

    /// Convenience accessor to clone the storage bridge.
    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.storage)
    }

    /// Convenience accessor to clone the clock.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

/// Build the default wasm bridge stack.
///
/// Hosts should call this during startup and pass the returned trait objects
/// into `core-service`.
pub fn build_wasm_bridges(config: WasmBridgeConfig) -> BridgeResult<WasmBridgeSet> {
    let http_client: Arc<dyn HttpClient> = Arc::new(WasmHttpClient::new()?);
    let storage: Arc<dyn KeyValueStore> =
        Arc::new(WasmLocalStore::new()?.with_namespace(&config.namespace));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    Ok(WasmBridgeSet {
        http_client,
        storage,
        clock,
    })
}
