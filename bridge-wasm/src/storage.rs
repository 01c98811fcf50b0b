//! `localStorage`-backed implementation of the `KeyValueStore` bridge.

use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    storage::KeyValueStore,
};

use crate::error::js_error;

/// Browser key-value store over `window.localStorage`.
///
/// Slots are written under their own names unless a prefix is set, so data
/// written by other code on the same origin under the same name is shared.
#[derive(Clone)]
pub struct WasmLocalStore {
    storage: web_sys::Storage,
    prefix: String,
}

impl WasmLocalStore {
    /// Bind to the current window's `localStorage`.
    pub fn new() -> BridgeResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| BridgeError::NotAvailable("window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|err| js_error("WasmLocalStore", "localStorage", err))?
            .ok_or_else(|| BridgeError::NotAvailable("localStorage".into()))?;
        Ok(Self {
            storage,
            prefix: String::new(),
        })
    }

    /// Prefix every slot name with `namespace::`.
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.prefix = if namespace.is_empty() {
            String::new()
        } else {
            format!("{namespace}::")
        };
        self
    }

    fn slot(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl KeyValueStore for WasmLocalStore {
    fn get_item(&self, key: &str) -> BridgeResult<Option<String>> {
        self.storage
            .get_item(&self.slot(key))
            .map_err(|err| js_error("WasmLocalStore", "get_item", err))
    }

    fn set_item(&self, key: &str, value: &str) -> BridgeResult<()> {
        self.storage
            .set_item(&self.slot(key), value)
            .map_err(|err| js_error("WasmLocalStore", "set_item", err))
    }

    fn remove_item(&self, key: &str) -> BridgeResult<()> {
        self.storage
            .remove_item(&self.slot(key))
            .map_err(|err| js_error("WasmLocalStore", "remove_item", err))
    }
}
