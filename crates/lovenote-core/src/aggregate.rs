//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for aggregate roots whose state is the fold of their event history.
///
/// Intents are recorded as events that are applied immediately, so the
/// in-memory state is always current. The same `apply` rebuilds the state
/// when a session is reconstituted from its journal.
pub trait AggregateRoot {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the current version (number of events applied).
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events recorded since the last journal append.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drains the uncommitted events once they have been journaled.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;

    /// Version the journal held before the uncommitted events were recorded.
    #[allow(clippy::cast_possible_wrap)]
    fn committed_version(&self) -> i64 {
        self.version() - self.uncommitted_events().len() as i64
    }
}
