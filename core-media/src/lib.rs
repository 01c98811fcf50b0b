//! # Media Module
//!
//! Client-side cache of exercise video URL health.
//!
//! ## Overview
//!
//! This module handles:
//! - Deriving cache keys from video source URLs
//! - Persisting probe verdicts with a 24h expiry and a size bound
//! - Answering "is this video broken / should it fall back to YouTube"
//! - Preloading verdicts by probing many URLs through the media proxy
//! - Reporting cache statistics
//! - Advising the player on how to play a given URL

pub mod cache;
pub mod error;
pub mod playback;

pub use cache::{
    derive_key, BatchProber, CacheEntry, CacheKey, CacheStats, PreloadProgress, PreloadSummary,
    ProxyEndpoint, VideoCacheConfig, VideoStatus, VideoUrlCache,
};
pub use error::{MediaError, Result};
pub use playback::{PlaybackAdvisor, PlaybackPlan};
