//! File-backed key-value store.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bridge_traits::{
    error::{BridgeError, Result},
    storage::KeyValueStore,
};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores each slot as one file under a root directory.
///
/// Slot names are base64url-encoded to form file names, so any key is
/// accepted. Writes go to a temporary sibling and are renamed into place,
/// leaving either the old or the new value on disk after a crash.
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Store under the platform data directory.
    pub fn new() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".local")
                    .join("share")
            })
            .join("clinic-media-core")
            .join("kv");

        Self { root }
    }

    pub fn with_directory(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.slot", URL_SAFE_NO_PAD.encode(key.as_bytes())))
    }

    fn map_write_error(e: std::io::Error) -> BridgeError {
        if e.kind() == ErrorKind::StorageFull {
            BridgeError::QuotaExceeded(e.to_string())
        } else {
            BridgeError::Io(e)
        }
    }
}

impl Default for FileKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BridgeError::Io(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
            debug!(path = ?self.root, "Created key-value directory");
        }

        let path = self.slot_path(key);
        let tmp = path.with_extension("slot.tmp");
        fs::write(&tmp, value).map_err(Self::map_write_error)?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            BridgeError::Io(e)
        })?;

        debug!(bytes = value.len(), "Wrote key-value slot");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BridgeError::Io(e)),
        }
    }
}
