//! # Video URL Cache
//!
//! In-memory map of derived key to [`CacheEntry`], mirrored to a single
//! persistent slot. Every operation is synchronous: the map sits behind a
//! `parking_lot::Mutex` that is never held across an `.await`, and the slot
//! is written through on each mutation.
//!
//! Storage problems never reach the caller. A missing, unreadable or corrupt
//! slot loads as an empty cache, and failed writes leave the in-memory state
//! intact. Both are logged at `warn`.

use super::config::VideoCacheConfig;
use super::entry::{CacheEntry, StoredEntry, VideoStatus};
use super::key::{derive_key, CacheKey};
use super::policy;
use crate::error::{MediaError, Result};
use bridge_traits::{storage::KeyValueStore, time::Clock};
use chrono::{DateTime, Utc};
use core_runtime::logging::redact_url;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Default)]
struct CacheState {
    initialized: bool,
    entries: HashMap<CacheKey, StoredEntry>,
    next_seq: u64,
}

impl CacheState {
    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

/// Device-local cache of video URL verdicts.
///
/// Construct one per session and share it through `Arc`. Operations call
/// [`init`](Self::init) implicitly on first use.
///
/// # Example
///
/// ```rust,ignore
/// use core_media::cache::{VideoCacheConfig, VideoStatus, VideoUrlCache};
///
/// let cache = VideoUrlCache::new(VideoCacheConfig::default(), storage, clock)?;
/// cache.set("https://cdn.example.com/squat.mp4", VideoStatus::Broken, None);
/// assert!(cache.is_broken("https://cdn.example.com/squat.mp4"));
/// ```
pub struct VideoUrlCache {
    config: VideoCacheConfig,
    ttl: chrono::Duration,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl VideoUrlCache {
    /// Create a cache over the given storage and clock.
    ///
    /// Nothing is read from storage until the first operation.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::InvalidConfig`] if `config` fails validation.
    pub fn new(
        config: VideoCacheConfig,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let ttl = chrono::Duration::from_std(config.ttl)
            .map_err(|e| MediaError::InvalidConfig(format!("ttl is out of range: {e}")))?;

        Ok(Self {
            config,
            ttl,
            storage,
            clock,
            state: Mutex::new(CacheState::default()),
        })
    }

    pub fn config(&self) -> &VideoCacheConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Load the persisted slot if that has not happened yet.
    ///
    /// Idempotent. Expired entries found in the slot are dropped.
    pub fn init(&self) {
        let mut state = self.state.lock();
        self.ensure_loaded(&mut state);
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    /// Live entry for `url`, if any.
    ///
    /// Expired entries read as absent but stay in the map until the next
    /// cleanup pass.
    pub fn get(&self, url: &str) -> Option<CacheEntry> {
        let now = self.now();
        self.with_state(|state| {
            state
                .entries
                .get(&derive_key(url))
                .filter(|stored| stored.entry.is_live(now))
                .map(|stored| stored.entry.clone())
        })
    }

    /// Record a verdict for `url` and persist.
    ///
    /// `resolved_url` defaults to `url`. Re-recording an existing URL
    /// refreshes its timestamp and expiry.
    pub fn set(&self, url: &str, status: VideoStatus, resolved_url: Option<&str>) -> CacheEntry {
        let now = self.now();
        let entry = CacheEntry::new(resolved_url.unwrap_or(url), status, now, self.ttl);

        self.with_state(|state| {
            let seq = state.next_seq();
            state.entries.insert(
                derive_key(url),
                StoredEntry {
                    entry: entry.clone(),
                    seq,
                },
            );
            debug!(
                url = redact_url(url),
                status = status.as_str(),
                "Recorded video status"
            );
            self.persist_locked(state);
        });

        entry
    }

    /// Forget `url` and persist. Returns whether an entry existed.
    pub fn remove(&self, url: &str) -> bool {
        self.with_state(|state| {
            let removed = state.entries.remove(&derive_key(url)).is_some();
            if removed {
                debug!(url = redact_url(url), "Removed video entry");
                self.persist_locked(state);
            }
            removed
        })
    }

    /// Run cleanup and the size bound, then write the whole map.
    pub fn persist(&self) {
        self.with_state(|state| self.persist_locked(state));
    }

    /// Empty the cache and delete the persisted slot.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.initialized = true;

        if let Err(e) = self.storage.remove_item(&self.config.storage_key) {
            warn!(error = %e, "Failed to remove persisted video cache");
        }
        info!("Video cache cleared");
    }

    /// Flush a final snapshot and drop the in-memory map.
    ///
    /// The next operation reloads from storage.
    pub fn dispose(&self) {
        let mut state = self.state.lock();
        if !state.initialized {
            return;
        }
        self.persist_locked(&mut state);
        state.entries.clear();
        state.initialized = false;
        debug!("Video cache disposed");
    }

    /// Number of entries held in memory, expired ones included.
    pub fn len(&self) -> usize {
        self.with_state(|state| state.entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every entry in memory, expired ones included, under one lock.
    pub(crate) fn for_each_entry(&self, mut f: impl FnMut(&CacheEntry)) {
        self.with_state(|state| state.entries.values().for_each(|stored| f(&stored.entry)));
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut CacheState) -> R) -> R {
        let mut state = self.state.lock();
        self.ensure_loaded(&mut state);
        f(&mut state)
    }

    fn ensure_loaded(&self, state: &mut CacheState) {
        if state.initialized {
            return;
        }
        state.initialized = true;

        let loaded = match self.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable video cache, starting empty");
                Vec::new()
            }
        };

        let now = self.now();
        let total = loaded.len();
        let mut live: Vec<(CacheKey, CacheEntry)> = loaded
            .into_iter()
            .filter(|(_, entry)| entry.is_live(now))
            .collect();
        // Loaded entries take their write order from their timestamps.
        live.sort_by(|a, b| a.1.recorded_at.cmp(&b.1.recorded_at));

        state.entries.clear();
        for (key, entry) in live {
            let seq = state.next_seq();
            state.entries.insert(key, StoredEntry { entry, seq });
        }

        info!(
            loaded = state.entries.len(),
            expired = total - state.entries.len(),
            "Video cache initialized"
        );
    }

    /// Read and decode the slot. Entries that fail to decode are skipped.
    fn load(&self) -> Result<Vec<(CacheKey, CacheEntry)>> {
        let Some(raw) = self.storage.get_item(&self.config.storage_key)? else {
            return Ok(Vec::new());
        };

        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)?;
        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) => entries.push((CacheKey::from(key), entry)),
                Err(e) => debug!(error = %e, "Skipping malformed cache entry"),
            }
        }
        Ok(entries)
    }

    fn persist_locked(&self, state: &mut CacheState) {
        let now = self.now();
        let expired = policy::purge_expired(&mut state.entries, now);
        let evicted = policy::enforce_size_bound(
            &mut state.entries,
            self.config.max_entries,
            self.config.trim_target(),
        );
        if expired > 0 || evicted > 0 {
            debug!(expired, evicted, remaining = state.entries.len(), "Trimmed video cache");
        }

        if let Err(e) = self.write_snapshot(&state.entries) {
            warn!(error = %e, entries = state.entries.len(), "Failed to persist video cache");
        }
    }

    fn write_snapshot(&self, entries: &HashMap<CacheKey, StoredEntry>) -> Result<()> {
        let snapshot: BTreeMap<&CacheKey, &CacheEntry> =
            entries.iter().map(|(key, stored)| (key, &stored.entry)).collect();
        let json = serde_json::to_string(&snapshot)?;
        self.storage.set_item(&self.config.storage_key, &json)?;
        Ok(())
    }
}
