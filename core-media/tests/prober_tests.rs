//! Batch prober tests against mocked and scripted HTTP clients.

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::{ManualClock, MemoryStore};
use core_media::cache::{BatchProber, VideoCacheConfig, VideoStatus, VideoUrlCache};
use mockall::mock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

mock! {
    pub Http {}

    #[async_trait]
    impl HttpClient for Http {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
    }
}

fn cache(config: VideoCacheConfig) -> Arc<VideoUrlCache> {
    Arc::new(
        VideoUrlCache::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::at_millis(1_700_000_000_000)),
        )
        .unwrap(),
    )
}

fn fast_config() -> VideoCacheConfig {
    VideoCacheConfig::default().with_batch_delay(Duration::ZERO)
}

fn video(i: usize) -> String {
    format!("https://cdn.example.com/exercises/{i}.mp4")
}

#[tokio::test]
async fn test_preload_skips_live_entries() {
    let cache = cache(fast_config());
    let urls: Vec<String> = (0..25).map(video).collect();
    for url in &urls[20..] {
        cache.set(url, VideoStatus::Working, None);
    }

    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|request| {
            request.url.starts_with("/api/video-proxy?url=")
                && request.headers.get("Accept").is_some_and(|v| v.starts_with("video/"))
        })
        .times(20)
        .returning(|request| {
            let status = if request.url.contains("1") { 404 } else { 200 };
            Ok(HttpResponse::with_status(status))
        });

    let prober = BatchProber::new(cache.clone(), Arc::new(http));
    let mut batches = Vec::new();
    let summary = prober
        .preload_with_progress(&urls, |progress| batches.push(*progress))
        .await;

    assert_eq!(summary.skipped, 5);
    assert_eq!(summary.succeeded + summary.failed, 20);
    // 1 and 10..=19 contain a "1"
    assert_eq!(summary.failed, 11);
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[1].summary.probed(), 20);
    assert_eq!(batches[2].summary.skipped, 5);

    assert!(cache.is_broken(&video(10)));
    assert_eq!(cache.status(&video(2)), Some(VideoStatus::Working));
    assert_eq!(cache.stats().total, 25);
}

#[tokio::test]
async fn test_transport_errors_mark_broken() {
    let cache = cache(fast_config());
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(2)
        .returning(|_| Err(BridgeError::OperationFailed("connection refused".into())));

    let prober = BatchProber::new(cache.clone(), Arc::new(http));
    let summary = prober.preload(&[video(1), video(2)]).await;

    assert_eq!(summary.failed, 2);
    assert_eq!(summary.succeeded, 0);
    assert!(cache.is_broken(&video(1)));
    assert_eq!(cache.resolve_url(&video(1)), video(1));
}

#[tokio::test]
async fn test_probe_targets_configured_origin() {
    let config = fast_config().with_proxy(
        core_media::cache::ProxyEndpoint::new("https://clinic.example.com").with_path("/proxy"),
    );
    let cache = cache(config);
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|request| {
            request.url
                == concat!(
                    "https://clinic.example.com/proxy",
                    "?url=https%3A%2F%2Fcdn.example.com%2Fexercises%2F3.mp4"
                )
        })
        .times(1)
        .returning(|_| Ok(HttpResponse::with_status(200)));

    let prober = BatchProber::new(cache.clone(), Arc::new(http));
    prober.preload(&[video(3)]).await;

    // The stored URL stays relative to the host page
    assert_eq!(
        cache.resolve_url(&video(3)),
        "/proxy?url=https%3A%2F%2Fcdn.example.com%2Fexercises%2F3.mp4"
    );
}

#[tokio::test]
async fn test_non_media_answer_marks_broken() {
    let cache = cache(fast_config());
    let mut http = MockHttp::new();
    http.expect_execute().times(2).returning(|request| {
        let content_type = if request.url.contains("1.mp4") {
            "text/html; charset=utf-8"
        } else {
            "video/mp4"
        };
        Ok(HttpResponse::with_status(200).with_header("Content-Type", content_type))
    });

    let prober = BatchProber::new(cache.clone(), Arc::new(http));
    let summary = prober.preload(&[video(1), video(2)]).await;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 1);
    assert!(cache.is_broken(&video(1)));
    assert_eq!(cache.status(&video(2)), Some(VideoStatus::Working));
}

/// Sleeps on every request and records how many were in flight at once.
struct SlowClient {
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl SlowClient {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HttpClient for SlowClient {
    async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(HttpResponse::with_status(200))
    }
}

#[tokio::test]
async fn test_batches_bound_concurrency() {
    let cache = cache(VideoCacheConfig::default().with_batch_delay(Duration::from_millis(5)));
    let client = Arc::new(SlowClient::new(Duration::from_millis(20)));
    let prober = BatchProber::new(cache, client.clone());
    let urls: Vec<String> = (0..25).map(video).collect();

    let summary = prober.preload(&urls).await;

    assert_eq!(summary.succeeded, 25);
    assert_eq!(client.calls.load(Ordering::SeqCst), 25);
    assert_eq!(client.peak.load(Ordering::SeqCst), 10);
    assert_eq!(client.in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_slow_probe_times_out_as_broken() {
    let config = fast_config().with_probe_timeout(Duration::from_millis(20));
    let cache = cache(config);
    let client = Arc::new(SlowClient::new(Duration::from_secs(5)));
    let prober = BatchProber::new(cache.clone(), client);

    let started = std::time::Instant::now();
    let summary = prober.preload(&[video(1)]).await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(summary.failed, 1);
    assert!(cache.is_broken(&video(1)));

    let err = BatchProber::new(
        cache.clone(),
        Arc::new(SlowClient::new(Duration::from_secs(5))),
    )
    .probe(&video(2))
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        core_media::MediaError::ProbeTimeout { timeout_ms: 20, .. }
    ));
}
