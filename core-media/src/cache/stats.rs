//! Cache statistics

use super::entry::VideoStatus;
use super::store::VideoUrlCache;
use serde::{Deserialize, Serialize};

/// Counts over the in-memory map at query time.
///
/// Expired entries count only as `expired`, never under their status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Every entry in memory
    pub total: usize,
    pub working: usize,
    pub broken: usize,
    pub youtube: usize,
    pub expired: usize,
}

impl CacheStats {
    /// Entries that are not expired.
    pub fn live(&self) -> usize {
        self.total - self.expired
    }

    /// Share of live entries that are `Working`, in `[0, 1]`.
    pub fn working_ratio(&self) -> f64 {
        match self.live() {
            0 => 0.0,
            live => self.working as f64 / live as f64,
        }
    }
}

impl VideoUrlCache {
    /// Single pass over memory; storage is not read.
    pub fn stats(&self) -> CacheStats {
        let now = self.now();
        let mut stats = CacheStats::default();

        self.for_each_entry(|entry| {
            stats.total += 1;
            if !entry.is_live(now) {
                stats.expired += 1;
                return;
            }
            match entry.status {
                VideoStatus::Working => stats.working += 1,
                VideoStatus::Broken => stats.broken += 1,
                VideoStatus::YouTubeFallback => stats.youtube += 1,
            }
        });

        stats
    }
}
