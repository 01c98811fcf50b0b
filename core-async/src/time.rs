//! Time-related abstractions.
//!
//! This module provides platform-agnostic time operations:
//! - On native platforms: Uses `tokio::time`
//! - On WASM: Uses `gloo-timers` (the browser's `setTimeout`)
//!
//! # Examples
//!
//! ```rust
//! use core_async::time::{sleep, timeout, Duration};
//!
//! async fn example() {
//!     sleep(Duration::from_millis(100)).await;
//!
//!     let result = timeout(Duration::from_secs(5), async { 42 }).await;
//!     assert!(result.is_ok());
//! }
//! ```

// ============================================================================
// Native Implementation (Tokio)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::time::{error::Elapsed as TimeoutError, sleep, timeout};

pub use std::time::Duration;

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
/// Sleeps for the specified duration.
///
/// This function uses the browser's `setTimeout` API internally.
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await
}

#[cfg(target_arch = "wasm32")]
/// Requires a future to complete before the specified duration has elapsed.
///
/// If the future completes first its output is returned, otherwise
/// [`TimeoutError`]. The losing future is dropped.
pub async fn timeout<F>(duration: Duration, future: F) -> Result<F::Output, TimeoutError>
where
    F: std::future::Future,
{
    let sleep_fut = sleep(duration);

    futures::pin_mut!(future);
    futures::pin_mut!(sleep_fut);

    match futures::future::select(future, sleep_fut).await {
        futures::future::Either::Left((output, _)) => Ok(output),
        futures::future::Either::Right(_) => Err(TimeoutError),
    }
}

#[cfg(target_arch = "wasm32")]
/// Error returned when a timeout expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutError;

#[cfg(target_arch = "wasm32")]
impl std::fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deadline has elapsed")
    }
}

#[cfg(target_arch = "wasm32")]
impl std::error::Error for TimeoutError {}

// ============================================================================
// Common Utilities
// ============================================================================

/// Sleeps only when `duration` is non-zero.
///
/// Skipping the zero case avoids yielding to the scheduler for nothing, which
/// matters for callers that make an inter-step delay configurable.
pub async fn pause(duration: Duration) {
    if !duration.is_zero() {
        sleep(duration).await;
    }
}
