//! Id generation for workers and projects.
//!
//! Ids are creation timestamps in milliseconds, which the notifications page
//! relies on to spot projects added in the last day. Two records created in
//! the same millisecond would collide, so the generator never hands out a
//! value at or below the last one it issued or observed.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Issues strictly increasing millisecond-timestamp ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Creates a generator with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Returns the next id for a record created now.
    pub fn next_id(&self) -> i64 {
        self.next_id_at(Utc::now())
    }

    /// Returns `max(now_ms, last + 1)` and records it.
    pub fn next_id_at(&self, now: DateTime<Utc>) -> i64 {
        let now_ms = now.timestamp_millis();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }

    /// Makes sure future ids land above `id`. Called with the highest id of
    /// every collection a page mounts.
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::AcqRel);
    }
}
