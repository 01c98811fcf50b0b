//! Time Abstraction
//!
//! Provides an injectable time source so expiry logic can be tested
//! deterministically.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;

use crate::platform::PlatformSendSync;

/// Time source trait
///
/// Abstracts system time to enable deterministic testing.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::time::Clock;
///
/// fn is_stale(clock: &dyn Clock, expires_at_ms: i64) -> bool {
///     clock.unix_timestamp_millis() > expires_at_ms
/// }
/// ```
pub trait Clock: PlatformSendSync {
    /// Get current UTC time
    fn now(&self) -> DateTime<Utc>;

    /// Get current Unix timestamp in seconds
    fn unix_timestamp(&self) -> i64 {
        self.now().timestamp()
    }

    /// Get current Unix timestamp in milliseconds
    fn unix_timestamp_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// System clock implementation using actual system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Start at the given Unix timestamp in milliseconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn at_millis(millis: i64) -> Self {
        let start = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default();
        Self::new(start)
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    pub fn advance(&self, by: std::time::Duration) {
        let Ok(delta) = ChronoDuration::from_std(by) else {
            return;
        };
        let mut now = self.now.lock();
        if let Some(next) = now.checked_add_signed(delta) {
            *now = next;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_system_clock() {
        let now = SystemClock.now();

        assert!(now.timestamp() > 0);
        assert_eq!(now.timestamp_millis().div_euclid(1000), now.timestamp());
    }

    #[test]
    fn test_timestamps_derive_from_now() {
        let clock = ManualClock::at_millis(1_700_000_000_999);

        assert_eq!(clock.unix_timestamp(), clock.now().timestamp());
        assert_eq!(clock.unix_timestamp(), 1_700_000_000);
        assert_eq!(clock.unix_timestamp_millis(), 1_700_000_000_999);
    }

    #[test]
    fn test_manual_clock_advances_only_on_request() {
        let clock = ManualClock::at_millis(1_700_000_000_000);
        assert_eq!(clock.unix_timestamp_millis(), 1_700_000_000_000);
        assert_eq!(clock.unix_timestamp_millis(), 1_700_000_000_000);

        clock.advance(Duration::from_secs(25 * 60 * 60));
        assert_eq!(
            clock.unix_timestamp_millis(),
            1_700_000_000_000 + 25 * 60 * 60 * 1000
        );
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::at_millis(0);
        let target = DateTime::<Utc>::from_timestamp_millis(42_000).unwrap();
        clock.set(target);
        assert_eq!(clock.now(), target);
        assert_eq!(clock.unix_timestamp(), 42);
    }
}
