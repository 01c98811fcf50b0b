//! Expiry cleanup and the size bound
//!
//! Both passes run over the in-memory map. Cleanup always precedes the trim
//! so eviction only ranks live entries.

use super::entry::StoredEntry;
use super::key::CacheKey;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Drop every entry with `now >= expires_at`. Returns the number removed.
pub(crate) fn purge_expired(
    entries: &mut HashMap<CacheKey, StoredEntry>,
    now: DateTime<Utc>,
) -> usize {
    let before = entries.len();
    entries.retain(|_, stored| stored.entry.is_live(now));
    before - entries.len()
}

/// When `entries` holds more than `max_entries`, evict the oldest until
/// `target` remain. Age is `recorded_at`, then write order.
///
/// Returns the number evicted.
pub(crate) fn enforce_size_bound(
    entries: &mut HashMap<CacheKey, StoredEntry>,
    max_entries: usize,
    target: usize,
) -> usize {
    if entries.len() <= max_entries {
        return 0;
    }

    let excess = entries.len().saturating_sub(target);
    let mut by_age: Vec<(DateTime<Utc>, u64, CacheKey)> = entries
        .iter()
        .map(|(key, stored)| (stored.entry.recorded_at, stored.seq, key.clone()))
        .collect();
    by_age.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    for (_, _, key) in by_age.into_iter().take(excess) {
        entries.remove(&key);
    }
    excess
}
