//! Command handlers for the page-flow context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the session, execute the intent, append the
//! resulting events to the journal.

use lovenote_core::aggregate::AggregateRoot;
use lovenote_core::clock::Clock;
use lovenote_core::command::Command;
use lovenote_core::error::DomainError;
use lovenote_core::event::EventMetadata;
use lovenote_core::journal::{EventJournal, StoredEvent};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::aggregates::StorySession;
use crate::domain::commands::{
    AdvancePage, AnswerValentine, DeclineDoodle, OpenEnvelope, RequestDoodle, RestartStory,
    RevealSecret, StartStory,
};
use crate::domain::events::{StoryEvent, StoryEventKind};
use crate::domain::page::Page;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct StoryCommandResult {
    /// The session affected or created by the command.
    pub aggregate_id: Uuid,
    /// The current page after the command.
    pub current_page: Page,
    /// The stored events produced and persisted. Empty when the intent had
    /// no effect.
    pub stored_events: Vec<StoredEvent>,
}

impl StoryCommandResult {
    /// Whether the command changed anything.
    #[must_use]
    pub fn had_effect(&self) -> bool {
        !self.stored_events.is_empty()
    }
}

/// Reconstitutes a `StorySession` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails or
/// an event does not follow from the state before it.
pub(crate) fn reconstitute(
    session_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<StorySession, DomainError> {
    let mut session = StorySession::new(session_id);
    for stored in existing_events {
        let kind: StoryEventKind =
            serde_json::from_value(stored.payload.clone()).map_err(|e| {
                DomainError::Infrastructure(format!("event deserialization failed: {e}"))
            })?;
        let event = StoryEvent {
            metadata: EventMetadata {
                event_id: stored.event_id,
                event_type: stored.event_type.clone(),
                aggregate_id: stored.aggregate_id,
                sequence_number: stored.sequence_number,
                correlation_id: stored.correlation_id,
                causation_id: stored.causation_id,
                occurred_at: stored.occurred_at,
            },
            kind,
        };
        session.replay(&event)?;
    }
    Ok(session)
}

/// Loads an existing session.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the session has no events.
pub(crate) fn load_session(
    session_id: Uuid,
    journal: &dyn EventJournal,
) -> Result<StorySession, DomainError> {
    let existing_events = journal.load_events(session_id)?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(session_id));
    }
    reconstitute(session_id, &existing_events)
}

/// Appends the session's uncommitted events and builds the result.
fn commit(
    session: &mut StorySession,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    let expected_version = session.committed_version();
    let stored_events: Vec<StoredEvent> = session
        .take_uncommitted_events()
        .iter()
        .map(StoredEvent::from_event)
        .collect();

    if stored_events.is_empty() {
        debug!(page = %session.current_page(), "intent had no effect");
    } else {
        journal.append_events(session.id, expected_version, &stored_events)?;
    }

    Ok(StoryCommandResult {
        aggregate_id: session.id,
        current_page: session.current_page(),
        stored_events,
    })
}

/// Loads the session, runs `execute` on it, and commits what it recorded.
fn execute_on_session<C: Command>(
    command: &C,
    session_id: Uuid,
    journal: &mut dyn EventJournal,
    execute: impl FnOnce(&mut StorySession),
) -> Result<StoryCommandResult, DomainError> {
    let mut session = load_session(session_id, &*journal)?;
    execute(&mut session);
    let result = commit(&mut session, journal)?;
    info!(
        command = command.command_type(),
        page = %result.current_page,
        events = result.stored_events.len(),
        "handled story command"
    );
    Ok(result)
}

/// Handles the `StartStory` command: creates a new session on the first page
/// and persists the `StoryStarted` event.
///
/// This is a creation command; the handler generates the session ID.
///
/// # Errors
///
/// Returns `DomainError` if event appending fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub fn handle_start_story(
    command: &StartStory,
    clock: &dyn Clock,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    let session_id = Uuid::new_v4();
    let mut session = StorySession::new(session_id);

    session.start(command.correlation_id, clock)?;

    let result = commit(&mut session, journal)?;
    info!(%session_id, "story session started");
    Ok(result)
}

/// Handles the `AdvancePage` command. A blocked or terminal page records
/// nothing and reports the unchanged page.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub fn handle_advance_page(
    command: &AdvancePage,
    clock: &dyn Clock,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    execute_on_session(command, command.session_id, journal, |session| {
        if !session.can_advance() {
            debug!(
                page = %session.current_page(),
                advancement = ?session.advancement(),
                "advance withheld by policy"
            );
        }
        session.advance(command.correlation_id, clock);
    })
}

/// Handles the `RestartStory` command: back to the first page with every
/// gate reset.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub fn handle_restart_story(
    command: &RestartStory,
    clock: &dyn Clock,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    execute_on_session(command, command.session_id, journal, |session| {
        session.restart(command.correlation_id, clock);
    })
}

/// Handles the `OpenEnvelope` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub fn handle_open_envelope(
    command: &OpenEnvelope,
    clock: &dyn Clock,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    execute_on_session(command, command.session_id, journal, |session| {
        session.open_envelope(command.correlation_id, clock);
    })
}

/// Handles the `RequestDoodle` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub fn handle_request_doodle(
    command: &RequestDoodle,
    clock: &dyn Clock,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    execute_on_session(command, command.session_id, journal, |session| {
        session.request_doodle(command.correlation_id, clock);
    })
}

/// Handles the `DeclineDoodle` command. The decline is journaled; the gate
/// is untouched.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub fn handle_decline_doodle(
    command: &DeclineDoodle,
    clock: &dyn Clock,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    execute_on_session(command, command.session_id, journal, |session| {
        session.decline_doodle(command.correlation_id, clock);
    })
}

/// Handles the `AnswerValentine` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id, answer = ?command.answer))]
pub fn handle_answer_valentine(
    command: &AnswerValentine,
    clock: &dyn Clock,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    execute_on_session(command, command.session_id, journal, |session| {
        session.answer_valentine(command.answer, command.correlation_id, clock);
    })
}

/// Handles the `RevealSecret` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub fn handle_reveal_secret(
    command: &RevealSecret,
    clock: &dyn Clock,
    journal: &mut dyn EventJournal,
) -> Result<StoryCommandResult, DomainError> {
    execute_on_session(command, command.session_id, journal, |session| {
        session.reveal_secret(command.correlation_id, clock);
    })
}
