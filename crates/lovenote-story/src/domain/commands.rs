//! Commands for the page-flow context.

use lovenote_core::command::Command;
use uuid::Uuid;

use super::intents::ValentineAnswer;

/// Command to begin a new story session.
#[derive(Debug, Clone)]
pub struct StartStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartStory {
    fn command_type(&self) -> &'static str {
        "story.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move to the next page, subject to the current page's gate.
#[derive(Debug, Clone)]
pub struct AdvancePage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story session.
    pub session_id: Uuid,
}

impl Command for AdvancePage {
    fn command_type(&self) -> &'static str {
        "story.advance_page"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to return to the first page with every gate reset.
#[derive(Debug, Clone)]
pub struct RestartStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story session.
    pub session_id: Uuid,
}

impl Command for RestartStory {
    fn command_type(&self) -> &'static str {
        "story.restart"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to open the envelope.
#[derive(Debug, Clone)]
pub struct OpenEnvelope {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story session.
    pub session_id: Uuid,
}

impl Command for OpenEnvelope {
    fn command_type(&self) -> &'static str {
        "story.open_envelope"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to show the doodle.
#[derive(Debug, Clone)]
pub struct RequestDoodle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story session.
    pub session_id: Uuid,
}

impl Command for RequestDoodle {
    fn command_type(&self) -> &'static str {
        "story.request_doodle"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to decline the doodle.
#[derive(Debug, Clone)]
pub struct DeclineDoodle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story session.
    pub session_id: Uuid,
}

impl Command for DeclineDoodle {
    fn command_type(&self) -> &'static str {
        "story.decline_doodle"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to answer the question.
#[derive(Debug, Clone)]
pub struct AnswerValentine {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story session.
    pub session_id: Uuid,
    /// Which affirmative option was picked.
    pub answer: ValentineAnswer,
}

impl Command for AnswerValentine {
    fn command_type(&self) -> &'static str {
        "story.answer_valentine"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to reveal the hidden message.
#[derive(Debug, Clone)]
pub struct RevealSecret {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story session.
    pub session_id: Uuid,
}

impl Command for RevealSecret {
    fn command_type(&self) -> &'static str {
        "story.reveal_secret"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
