//! Query handlers for the page-flow context.
//!
//! This module contains query handlers that reconstitute the session from
//! its journal and return read-only view DTOs.

use lovenote_core::aggregate::AggregateRoot;
use lovenote_core::error::DomainError;
use lovenote_core::journal::EventJournal;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::StorySession;
use crate::domain::gates::RevealGateSet;
use crate::domain::intents::Intent;
use crate::domain::page::{PAGE_COUNT, Page};
use crate::domain::policy::Advancement;

/// Read-only view of a story session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryView {
    /// The session identifier.
    pub session_id: Uuid,
    /// The current page.
    pub current_page: Page,
    /// Number of pages in the story.
    pub page_count: u8,
    /// Every reveal gate's current value.
    pub gates: RevealGateSet,
    /// The current page's advancement rule.
    pub advancement: Advancement,
    /// Whether advancing would move to the next page right now.
    pub can_advance: bool,
    /// Whether the story is resting on its final page.
    pub is_terminal: bool,
    /// The intents to offer the reader.
    pub offered_intents: Vec<Intent>,
    /// Current version (event count).
    pub version: i64,
}

impl From<&StorySession> for StoryView {
    fn from(session: &StorySession) -> Self {
        Self {
            session_id: session.id,
            current_page: session.current_page(),
            page_count: PAGE_COUNT,
            gates: *session.gates(),
            advancement: session.advancement(),
            can_advance: session.can_advance(),
            is_terminal: session.is_terminal(),
            offered_intents: session.offered_intents(),
            version: session.version(),
        }
    }
}

/// Retrieves a story session by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub fn get_story_by_id(
    session_id: Uuid,
    journal: &dyn EventJournal,
) -> Result<StoryView, DomainError> {
    let session = command_handlers::load_session(session_id, journal)?;
    Ok(StoryView::from(&session))
}
