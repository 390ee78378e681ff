//! Deterministic `Clock` implementation for tests.

use chrono::{DateTime, TimeZone, Utc};
use lovenote_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed timestamp shared by tests across the workspace.
///
/// # Panics
///
/// Never; the date is a valid constant.
#[must_use]
pub fn valentines_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap()
}
