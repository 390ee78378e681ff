//! User intents the presentation layer can emit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which affirmative option the reader picked on the question page. Both
/// lead to the same state; the wording is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValentineAnswer {
    /// "Yes".
    Yes,
    /// "Of course".
    OfCourse,
}

/// A discrete user action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Continue to the next page.
    Advance,
    /// Start the story over.
    Restart,
    /// Open the envelope.
    OpenEnvelope,
    /// Ask to see the doodle.
    RequestDoodle,
    /// Decline the doodle.
    DeclineDoodle,
    /// Answer the question with "Yes".
    AnswerYes,
    /// Answer the question with "Of course".
    AnswerOfCourse,
    /// Reveal the hidden message.
    RevealSecret,
}

/// Returned when text does not name an intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown intent: {0:?}")]
pub struct IntentParseError(pub String);

impl Intent {
    /// Every intent.
    pub const ALL: [Intent; 8] = [
        Intent::Advance,
        Intent::Restart,
        Intent::OpenEnvelope,
        Intent::RequestDoodle,
        Intent::DeclineDoodle,
        Intent::AnswerYes,
        Intent::AnswerOfCourse,
        Intent::RevealSecret,
    ];

    /// The snake_case name used in views and scripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Intent::Advance => "advance",
            Intent::Restart => "restart",
            Intent::OpenEnvelope => "open_envelope",
            Intent::RequestDoodle => "request_doodle",
            Intent::DeclineDoodle => "decline_doodle",
            Intent::AnswerYes => "answer_yes",
            Intent::AnswerOfCourse => "answer_of_course",
            Intent::RevealSecret => "reveal_secret",
        }
    }
}

impl FromStr for Intent {
    type Err = IntentParseError;

    /// Accepts the snake_case name or its kebab-case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Intent::ALL
            .into_iter()
            .find(|intent| intent.name() == normalized)
            .ok_or_else(|| IntentParseError(s.trim().to_owned()))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
