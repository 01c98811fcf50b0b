//! # Playback Advisor
//!
//! Turns cache lookups into a decision for the video player and records what
//! happened when a video was actually played.
//!
//! Unknown URLs are played optimistically. The player then reports back with
//! [`PlaybackAdvisor::report_loaded`] or [`PlaybackAdvisor::report_failed`],
//! and the next [`PlaybackAdvisor::plan`] for that URL follows the verdict
//! until it expires.

use crate::cache::{VideoStatus, VideoUrlCache};
use core_runtime::logging::redact_url;
use std::sync::Arc;
use tracing::debug;

/// What the player should do with a source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackPlan {
    /// Play `url` directly.
    ///
    /// `optimistic` is set when nothing is known about the source yet, so a
    /// failure is expected to be reported.
    Play { url: String, optimistic: bool },

    /// Play the YouTube alternative instead.
    YouTube { url: String },

    /// Show the "video unavailable" state.
    Unavailable,
}

impl PlaybackPlan {
    pub fn is_playable(&self) -> bool {
        !matches!(self, PlaybackPlan::Unavailable)
    }
}

/// Player-facing view over a shared [`VideoUrlCache`].
#[derive(Clone)]
pub struct PlaybackAdvisor {
    cache: Arc<VideoUrlCache>,
}

impl PlaybackAdvisor {
    pub fn new(cache: Arc<VideoUrlCache>) -> Self {
        Self { cache }
    }

    pub fn plan(&self, url: &str, youtube_alternative: Option<&str>) -> PlaybackPlan {
        match self.cache.get(url) {
            None => PlaybackPlan::Play {
                url: url.to_string(),
                optimistic: true,
            },
            Some(entry) => match entry.status {
                VideoStatus::Working => PlaybackPlan::Play {
                    url: entry.resolved_url,
                    optimistic: false,
                },
                VideoStatus::Broken => PlaybackPlan::Unavailable,
                VideoStatus::YouTubeFallback => match youtube_alternative {
                    Some(alt) => PlaybackPlan::YouTube {
                        url: alt.to_string(),
                    },
                    None => PlaybackPlan::Unavailable,
                },
            },
        }
    }

    /// The player loaded `url`, possibly through `resolved_url`.
    pub fn report_loaded(&self, url: &str, resolved_url: Option<&str>) {
        self.cache.set(url, VideoStatus::Working, resolved_url);
    }

    /// The player could not load `url`. Returns the recorded status.
    pub fn report_failed(&self, url: &str, has_youtube_alternative: bool) -> VideoStatus {
        let status = if has_youtube_alternative {
            VideoStatus::YouTubeFallback
        } else {
            VideoStatus::Broken
        };
        debug!(url = %redact_url(url), status = status.as_str(), "Playback failed");
        self.cache.set(url, status, None);
        status
    }

    /// Forget the verdict for `url` so the next plan is optimistic again.
    pub fn retry(&self, url: &str) -> bool {
        self.cache.remove(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::VideoCacheConfig;
    use bridge_traits::{ManualClock, MemoryStore};
    use std::time::Duration;

    const URL: &str = "https://cdn.example.com/exercises/plank.mp4";
    const ALT: &str = "https://www.youtube.com/watch?v=plank";

    fn advisor() -> (PlaybackAdvisor, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_millis(1_700_000_000_000));
        let cache = VideoUrlCache::new(
            VideoCacheConfig::default(),
            Arc::new(MemoryStore::new()),
            clock.clone(),
        )
        .unwrap();
        (PlaybackAdvisor::new(Arc::new(cache)), clock)
    }

    #[test]
    fn test_unknown_plays_optimistically() {
        let (advisor, _) = advisor();
        assert_eq!(
            advisor.plan(URL, Some(ALT)),
            PlaybackPlan::Play {
                url: URL.to_string(),
                optimistic: true,
            }
        );
    }

    #[test]
    fn test_loaded_plays_resolved_url() {
        let (advisor, _) = advisor();
        advisor.report_loaded(URL, Some("/api/video-proxy?url=plank"));
        assert_eq!(
            advisor.plan(URL, None),
            PlaybackPlan::Play {
                url: "/api/video-proxy?url=plank".to_string(),
                optimistic: false,
            }
        );
    }

    #[test]
    fn test_failure_with_alternative_falls_back() {
        let (advisor, _) = advisor();
        assert_eq!(advisor.report_failed(URL, true), VideoStatus::YouTubeFallback);
        assert_eq!(
            advisor.plan(URL, Some(ALT)),
            PlaybackPlan::YouTube {
                url: ALT.to_string()
            }
        );
        assert_eq!(advisor.plan(URL, None), PlaybackPlan::Unavailable);
    }

    #[test]
    fn test_failure_without_alternative_is_unavailable() {
        let (advisor, _) = advisor();
        assert_eq!(advisor.report_failed(URL, false), VideoStatus::Broken);
        let plan = advisor.plan(URL, Some(ALT));
        assert_eq!(plan, PlaybackPlan::Unavailable);
        assert!(!plan.is_playable());
    }

    #[test]
    fn test_retry_forgets_verdict() {
        let (advisor, _) = advisor();
        advisor.report_failed(URL, false);
        assert!(advisor.retry(URL));
        assert!(!advisor.retry(URL));
        assert!(matches!(
            advisor.plan(URL, None),
            PlaybackPlan::Play { optimistic: true, .. }
        ));
    }

    #[test]
    fn test_verdict_expires() {
        let (advisor, clock) = advisor();
        advisor.report_failed(URL, false);
        clock.advance(Duration::from_secs(24 * 3_600));
        assert!(advisor.plan(URL, None).is_playable());
    }
}
