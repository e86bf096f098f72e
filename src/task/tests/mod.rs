//! Unit and orchestration tests for the task module.

mod service_tests;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI32, Ordering};

/// Deterministic clock pinned to a fixed instant.
#[derive(Debug, Clone)]
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that advances by a fixed step on every read, so consecutive
/// timestamps are strictly increasing.
#[derive(Debug)]
pub(crate) struct SteppingClock {
    start: DateTime<Utc>,
    step: Duration,
    reads: AtomicI32,
}

impl SteppingClock {
    pub(crate) fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            start,
            step,
            reads: AtomicI32::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let read = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + self.step * read
    }
}

/// Fixed base instant used across the task tests.
pub(crate) fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}
