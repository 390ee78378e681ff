//! Domain events for the page-flow context.

use lovenote_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::page::Page;

/// Emitted when a story session begins on the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStarted {
    /// The story session identifier.
    pub session_id: Uuid,
}

/// Emitted when the story moves to the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAdvanced {
    /// The story session identifier.
    pub session_id: Uuid,
    /// The page that was left.
    pub from: Page,
    /// The page that is now current.
    pub to: Page,
}

/// Emitted when a reveal gate is satisfied for the first time, or when the
/// doodle is declined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateTouched {
    /// The story session identifier.
    pub session_id: Uuid,
    /// The page the reader was on.
    pub page: Page,
}

/// Emitted when the story returns to the first page with every gate reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRestarted {
    /// The story session identifier.
    pub session_id: Uuid,
    /// The page the restart was requested from.
    pub from: Page,
}

/// Event type identifier for [`StoryStarted`].
pub const STORY_STARTED_EVENT_TYPE: &str = "story.started";

/// Event type identifier for [`PageAdvanced`].
pub const PAGE_ADVANCED_EVENT_TYPE: &str = "story.page_advanced";

/// Event type identifier for an opened envelope.
pub const ENVELOPE_OPENED_EVENT_TYPE: &str = "story.envelope_opened";

/// Event type identifier for a requested doodle.
pub const DOODLE_REQUESTED_EVENT_TYPE: &str = "story.doodle_requested";

/// Event type identifier for a declined doodle.
pub const DOODLE_DECLINED_EVENT_TYPE: &str = "story.doodle_declined";

/// Event type identifier for an answered question.
pub const VALENTINE_ANSWERED_EVENT_TYPE: &str = "story.valentine_answered";

/// Event type identifier for a revealed secret.
pub const SECRET_REVEALED_EVENT_TYPE: &str = "story.secret_revealed";

/// Event type identifier for [`StoryRestarted`].
pub const STORY_RESTARTED_EVENT_TYPE: &str = "story.restarted";

/// Event payload variants for the page-flow context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryEventKind {
    /// The session has started.
    StoryStarted(StoryStarted),
    /// The story moved forward one page.
    PageAdvanced(PageAdvanced),
    /// The envelope was opened.
    EnvelopeOpened(GateTouched),
    /// The doodle is now shown.
    DoodleRequested(GateTouched),
    /// The doodle was declined. Carries no state change.
    DoodleDeclined(GateTouched),
    /// The question was answered.
    ValentineAnswered(GateTouched),
    /// The hidden message was revealed.
    SecretRevealed(GateTouched),
    /// The story was restarted.
    StoryRestarted(StoryRestarted),
}

impl StoryEventKind {
    /// The stable type name of this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            StoryEventKind::StoryStarted(_) => STORY_STARTED_EVENT_TYPE,
            StoryEventKind::PageAdvanced(_) => PAGE_ADVANCED_EVENT_TYPE,
            StoryEventKind::EnvelopeOpened(_) => ENVELOPE_OPENED_EVENT_TYPE,
            StoryEventKind::DoodleRequested(_) => DOODLE_REQUESTED_EVENT_TYPE,
            StoryEventKind::DoodleDeclined(_) => DOODLE_DECLINED_EVENT_TYPE,
            StoryEventKind::ValentineAnswered(_) => VALENTINE_ANSWERED_EVENT_TYPE,
            StoryEventKind::SecretRevealed(_) => SECRET_REVEALED_EVENT_TYPE,
            StoryEventKind::StoryRestarted(_) => STORY_RESTARTED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the page-flow context.
#[derive(Debug, Clone)]
pub struct StoryEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: StoryEventKind,
}

impl DomainEvent for StoryEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("StoryEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
