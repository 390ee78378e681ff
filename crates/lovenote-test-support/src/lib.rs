//! Shared test doubles and utilities for the Lovenote story engine.

mod clock;
mod journal;

pub use clock::{FixedClock, valentines_morning};
pub use journal::{FailingEventJournal, RecordingEventJournal};
