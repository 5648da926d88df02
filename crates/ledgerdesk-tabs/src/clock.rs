//! Time source for open/access stamps

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Logical clock: every reading is one millisecond after the previous one.
///
/// Gives strictly increasing stamps, so recency ordering never depends on
/// how fast the caller runs.
#[derive(Debug)]
pub struct ManualClock {
    origin: DateTime<Utc>,
    ticks: AtomicI64,
}

impl ManualClock {
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self {
            origin,
            ticks: AtomicI64::new(0),
        }
    }

    /// Jump forward without producing a reading.
    pub fn advance(&self, millis: i64) {
        self.ticks.fetch_add(millis.max(0), Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        self.origin + Duration::milliseconds(tick)
    }
}
