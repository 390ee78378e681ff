//! Mock `EventJournal` implementations for tests.

use lovenote_core::error::DomainError;
use lovenote_core::journal::{EventJournal, StoredEvent};
use uuid::Uuid;

/// An event journal that records every `append_events` call. `load_events`
/// returns the seeded history followed by everything appended so far, so a
/// sequence of handler calls sees its own effects.
#[derive(Debug, Default)]
pub struct RecordingEventJournal {
    history: Vec<StoredEvent>,
    appended: Vec<(Uuid, i64, Vec<StoredEvent>)>,
}

impl RecordingEventJournal {
    /// Create a new recording journal seeded with `history`.
    #[must_use]
    pub fn new(history: Vec<StoredEvent>) -> Self {
        Self {
            history,
            appended: Vec::new(),
        }
    }

    /// Returns a snapshot of all `(aggregate_id, expected_version, events)`
    /// triples that were appended.
    #[must_use]
    pub fn appended_events(&self) -> Vec<(Uuid, i64, Vec<StoredEvent>)> {
        self.appended.clone()
    }
}

impl EventJournal for RecordingEventJournal {
    fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self.history.clone())
    }

    fn append_events(
        &mut self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.history.extend_from_slice(events);
        self.appended
            .push((aggregate_id, expected_version, events.to_vec()));
        Ok(())
    }
}

/// An event journal that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingEventJournal;

impl EventJournal for FailingEventJournal {
    fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("journal unavailable".into()))
    }

    fn append_events(
        &mut self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("journal unavailable".into()))
    }
}
