//! # Media Error Types
//!
//! Error types for the video URL cache. Most of these never reach callers of
//! the cache itself: storage and probe failures are logged and absorbed.

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Errors that can occur in media cache operations.
#[derive(Error, Debug)]
pub enum MediaError {
    /// Reading or writing the persistent slot failed.
    #[error("Cache storage error: {0}")]
    Storage(String),

    /// Persistent storage refused the write because it is full.
    #[error("Cache storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The persisted snapshot could not be encoded or decoded.
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The probe request could not be completed.
    #[error("Probe failed for {url}: {reason}")]
    Probe { url: String, reason: String },

    /// The probe did not settle within its time budget.
    #[error("Probe timed out for {url} after {timeout_ms} ms")]
    ProbeTimeout { url: String, timeout_ms: u64 },

    /// A configuration value is out of range.
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),
}

impl MediaError {
    /// Returns `true` if retrying the same operation later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MediaError::Probe { .. } | MediaError::ProbeTimeout { .. } | MediaError::Storage(_)
        )
    }
}

impl From<BridgeError> for MediaError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::QuotaExceeded(msg) => MediaError::QuotaExceeded(msg),
            other => MediaError::Storage(other.to_string()),
        }
    }
}

/// Result type for media operations.
pub type Result<T> = std::result::Result<T, MediaError>;
