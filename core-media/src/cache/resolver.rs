//! Read-only status lookups
//!
//! None of these mutate the map or touch the network. A URL without a live
//! entry is unknown: not broken, no fallback, and it resolves to itself.

use super::entry::VideoStatus;
use super::store::VideoUrlCache;

impl VideoUrlCache {
    /// The stored resolved URL when the entry is live and `Working`,
    /// otherwise `url` unchanged.
    pub fn resolve_url(&self, url: &str) -> String {
        match self.get(url) {
            Some(entry) if entry.status == VideoStatus::Working => entry.resolved_url,
            _ => url.to_string(),
        }
    }

    pub fn is_broken(&self, url: &str) -> bool {
        self.status(url) == Some(VideoStatus::Broken)
    }

    pub fn should_fallback_to_youtube(&self, url: &str) -> bool {
        self.status(url) == Some(VideoStatus::YouTubeFallback)
    }

    /// Status of the live entry for `url`; `None` means unknown.
    pub fn status(&self, url: &str) -> Option<VideoStatus> {
        self.get(url).map(|entry| entry.status)
    }
}

#[cfg(test)]
mod tests {
    use crate::cache::{VideoCacheConfig, VideoStatus, VideoUrlCache};
    use bridge_traits::{ManualClock, MemoryStore};
    use std::sync::Arc;
    use std::time::Duration;

    const URL: &str = "https://cdn.example.com/exercises/bridge.mp4";

    fn cache() -> (VideoUrlCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_millis(1_700_000_000_000));
        let cache = VideoUrlCache::new(
            VideoCacheConfig::default(),
            Arc::new(MemoryStore::new()),
            clock.clone(),
        )
        .unwrap();
        (cache, clock)
    }

    #[test]
    fn test_unknown_url_defaults() {
        let (cache, _) = cache();
        assert_eq!(cache.resolve_url(URL), URL);
        assert!(!cache.is_broken(URL));
        assert!(!cache.should_fallback_to_youtube(URL));
        assert_eq!(cache.status(URL), None);
    }

    #[test]
    fn test_working_resolves_to_stored_url() {
        let (cache, _) = cache();
        cache.set(URL, VideoStatus::Working, Some("/api/video-proxy?url=x"));
        assert_eq!(cache.resolve_url(URL), "/api/video-proxy?url=x");
        assert!(!cache.is_broken(URL));
    }

    #[test]
    fn test_non_working_never_resolves() {
        let (cache, _) = cache();
        cache.set(URL, VideoStatus::Broken, Some("/api/video-proxy?url=x"));
        assert_eq!(cache.resolve_url(URL), URL);
        assert!(cache.is_broken(URL));

        cache.set(URL, VideoStatus::YouTubeFallback, Some("https://youtu.be/abc"));
        assert_eq!(cache.resolve_url(URL), URL);
        assert!(cache.should_fallback_to_youtube(URL));
        assert!(!cache.is_broken(URL));
    }

    #[test]
    fn test_expired_entry_reads_as_unknown() {
        let (cache, clock) = cache();
        cache.set(URL, VideoStatus::Broken, None);
        clock.advance(Duration::from_secs(25 * 3_600));

        assert_eq!(cache.status(URL), None);
        assert!(!cache.is_broken(URL));
        assert_eq!(cache.resolve_url(URL), URL);
    }
}
