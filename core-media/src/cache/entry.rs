//! Cache entries and their persisted form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last known probe outcome for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoStatus {
    /// The proxy served the media.
    #[serde(rename = "working")]
    Working,

    /// The media could not be reached.
    #[serde(rename = "broken")]
    Broken,

    /// Play the YouTube alternative instead.
    #[serde(rename = "youtube_fallback")]
    YouTubeFallback,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Working => "working",
            VideoStatus::Broken => "broken",
            VideoStatus::YouTubeFallback => "youtube_fallback",
        }
    }
}

/// Cached verdict about one source URL.
///
/// Serialized as `{url, timestamp, status, expiresAt}` with millisecond
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// URL to hand to the player
    #[serde(rename = "url")]
    pub resolved_url: String,

    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub recorded_at: DateTime<Utc>,

    pub status: VideoStatus,

    /// Always `recorded_at + ttl`
    #[serde(rename = "expiresAt", with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(
        resolved_url: impl Into<String>,
        status: VideoStatus,
        recorded_at: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            resolved_url: resolved_url.into(),
            recorded_at,
            status,
            expires_at: recorded_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// An entry stops being live at the instant it expires.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-memory slot: the entry plus its write sequence number, which breaks
/// ties between entries recorded in the same millisecond.
#[derive(Debug, Clone)]
pub(crate) struct StoredEntry {
    pub entry: CacheEntry,
    pub seq: u64,
}
