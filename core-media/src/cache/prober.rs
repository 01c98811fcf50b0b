//! # Batch Prober
//!
//! Probes many URLs through the media proxy and records each verdict in the
//! cache.
//!
//! ## Workflow
//!
//! 1. Split the input into batches of `batch_size`, keeping input order
//! 2. Within a batch, skip URLs that already have a live entry and send a
//!    `HEAD` request for every other one, all polled concurrently
//! 3. Wait for every probe in the batch to settle
//! 4. Pause for `batch_delay`, then move on to the next batch
//!
//! A probe failure is a verdict (`Broken`), never an error for the caller.
//! A probe passes on a 2xx status whose `Content-Type` is a video type,
//! `application/octet-stream`, or absent.

use super::entry::VideoStatus;
use super::store::VideoUrlCache;
use crate::error::{MediaError, Result};
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use core_async::join::join_all;
use core_async::time::{pause, timeout};
use core_runtime::logging::redact_url;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const ACCEPT_MEDIA: &str = "video/*, application/octet-stream";

/// Reason a successful response still fails the check, if any.
fn rejection(response: &HttpResponse) -> Option<String> {
    if !response.is_success() {
        return Some(format!("proxy answered HTTP {}", response.status));
    }
    match response.content_type() {
        None => None,
        Some(ct) if ct.starts_with("video/") || ct == "application/octet-stream" => None,
        Some(ct) => Some(format!("unexpected content type {ct}")),
    }
}

/// Counts accumulated over a preload run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadSummary {
    /// Probed and recorded `Working`
    pub succeeded: usize,
    /// Probed and recorded `Broken`
    pub failed: usize,
    /// Already had a live entry
    pub skipped: usize,
}

impl PreloadSummary {
    pub fn probed(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn total(&self) -> usize {
        self.probed() + self.skipped
    }

    fn record(&mut self, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Succeeded => self.succeeded += 1,
            ProbeOutcome::Failed => self.failed += 1,
            ProbeOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Reported after each finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadProgress {
    /// Zero-based index of the batch that just settled
    pub batch_index: usize,
    pub total_batches: usize,
    /// Running totals including this batch
    pub summary: PreloadSummary,
}

impl PreloadProgress {
    pub fn is_last(&self) -> bool {
        self.batch_index + 1 == self.total_batches
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeOutcome {
    Succeeded,
    Failed,
    Skipped,
}

/// Populates a [`VideoUrlCache`] by probing URLs through the media proxy.
///
/// # Example
///
/// ```rust,ignore
/// let prober = BatchProber::new(cache.clone(), http_client);
/// let summary = prober.preload(&exercise_video_urls).await;
/// println!("{} working, {} broken", summary.succeeded, summary.failed);
/// ```
pub struct BatchProber {
    cache: Arc<VideoUrlCache>,
    http_client: Arc<dyn HttpClient>,
}

impl BatchProber {
    pub fn new(cache: Arc<VideoUrlCache>, http_client: Arc<dyn HttpClient>) -> Self {
        Self { cache, http_client }
    }

    pub fn cache(&self) -> &Arc<VideoUrlCache> {
        &self.cache
    }

    /// Probe every URL without a live entry and record the results.
    pub async fn preload<S: AsRef<str>>(&self, urls: &[S]) -> PreloadSummary {
        self.preload_with_progress(urls, |_| {}).await
    }

    /// Same as [`preload`](Self::preload), calling `on_batch` after every
    /// settled batch.
    #[instrument(skip(self, urls, on_batch), fields(url_count = urls.len()))]
    pub async fn preload_with_progress<S, F>(&self, urls: &[S], mut on_batch: F) -> PreloadSummary
    where
        S: AsRef<str>,
        F: FnMut(&PreloadProgress),
    {
        let config = self.cache.config();
        let batch_size = config.batch_size.max(1);
        let total_batches = urls.len().div_ceil(batch_size);
        let mut summary = PreloadSummary::default();

        for (batch_index, batch) in urls.chunks(batch_size).enumerate() {
            if batch_index > 0 {
                pause(config.batch_delay).await;
            }

            let probes = batch.iter().map(|url| self.probe_and_record(url.as_ref()));
            for outcome in join_all(probes).await {
                summary.record(outcome);
            }

            debug!(
                batch = batch_index + 1,
                total_batches,
                succeeded = summary.succeeded,
                failed = summary.failed,
                skipped = summary.skipped,
                "Preload batch settled"
            );
            on_batch(&PreloadProgress {
                batch_index,
                total_batches,
                summary,
            });
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            "Preload finished"
        );
        summary
    }

    /// Send one probe for `url` through the proxy without touching the cache.
    ///
    /// # Errors
    ///
    /// - [`MediaError::ProbeTimeout`] if no response arrives within `probe_timeout`
    /// - [`MediaError::Probe`] on a transport error, a non-2xx status, or a
    ///   content type that is not media
    #[instrument(skip(self, url), fields(url = %redact_url(url)))]
    pub async fn probe(&self, url: &str) -> Result<()> {
        let config = self.cache.config();
        let request = HttpRequest::head(config.proxy.probe_url(url))
            .header("Accept", ACCEPT_MEDIA)
            .timeout(config.probe_timeout);

        let response = timeout(config.probe_timeout, self.http_client.execute(request))
            .await
            .map_err(|_| MediaError::ProbeTimeout {
                url: redact_url(url).to_string(),
                timeout_ms: config.probe_timeout.as_millis() as u64,
            })?
            .map_err(|e| MediaError::Probe {
                url: redact_url(url).to_string(),
                reason: e.to_string(),
            })?;

        match rejection(&response) {
            None => Ok(()),
            Some(reason) => Err(MediaError::Probe {
                url: redact_url(url).to_string(),
                reason,
            }),
        }
    }

    async fn probe_and_record(&self, url: &str) -> ProbeOutcome {
        if self.cache.get(url).is_some() {
            return ProbeOutcome::Skipped;
        }

        match self.probe(url).await {
            Ok(()) => {
                let proxied = self.cache.config().proxy.proxy_url(url);
                self.cache.set(url, VideoStatus::Working, Some(&proxied));
                ProbeOutcome::Succeeded
            }
            Err(e) => {
                debug!(url = %redact_url(url), error = %e, "Probe failed, marking broken");
                self.cache.set(url, VideoStatus::Broken, None);
                ProbeOutcome::Failed
            }
        }
    }
}
