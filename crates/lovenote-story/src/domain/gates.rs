//! Per-page reveal gates.
//!
//! Each gated page holds the reader until they interact with its content.
//! The gates are one-way latches: once satisfied they stay satisfied until
//! the story restarts.

use serde::{Deserialize, Serialize};

use super::page::Page;

/// Identifies one of the four reveal gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// The envelope on the letter page.
    Envelope,
    /// The doodle on the memories page.
    Doodle,
    /// The answer to the question.
    Valentine,
    /// The hidden message.
    Secret,
}

impl GateKind {
    /// The page this gate belongs to.
    #[must_use]
    pub const fn page(self) -> Page {
        match self {
            GateKind::Envelope => Page::Letter,
            GateKind::Doodle => Page::Memories,
            GateKind::Valentine => Page::Question,
            GateKind::Secret => Page::Secret,
        }
    }
}

/// State of the doodle reveal on the memories page.
///
/// The reader is asked whether they want to see the doodle. Saying yes
/// moves it to `Shown`; saying no is acknowledged but leaves it
/// `Undecided`, so the question stays open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoodleReveal {
    /// The reader has not asked to see the doodle.
    #[default]
    Undecided,
    /// The doodle is on screen.
    Shown,
}

/// The reveal gates of a story session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealGateSet {
    envelope_open: bool,
    doodle: DoodleReveal,
    valentine_answered: bool,
    secret_revealed: bool,
}

impl RevealGateSet {
    /// All gates at their defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the envelope has been opened.
    #[must_use]
    pub fn envelope_open(&self) -> bool {
        self.envelope_open
    }

    /// The doodle reveal state.
    #[must_use]
    pub fn doodle(&self) -> DoodleReveal {
        self.doodle
    }

    /// Whether the question has been answered.
    #[must_use]
    pub fn valentine_answered(&self) -> bool {
        self.valentine_answered
    }

    /// Whether the hidden message has been revealed.
    #[must_use]
    pub fn secret_revealed(&self) -> bool {
        self.secret_revealed
    }

    /// Whether `gate` is satisfied.
    #[must_use]
    pub fn is_satisfied(&self, gate: GateKind) -> bool {
        match gate {
            GateKind::Envelope => self.envelope_open,
            GateKind::Doodle => self.doodle == DoodleReveal::Shown,
            GateKind::Valentine => self.valentine_answered,
            GateKind::Secret => self.secret_revealed,
        }
    }

    /// Whether every gate is at its default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Opens the envelope. Returns `true` if this changed state.
    pub fn open_envelope(&mut self) -> bool {
        !std::mem::replace(&mut self.envelope_open, true)
    }

    /// Shows the doodle. Returns `true` if this changed state.
    pub fn request_doodle(&mut self) -> bool {
        std::mem::replace(&mut self.doodle, DoodleReveal::Shown) == DoodleReveal::Undecided
    }

    /// Acknowledges a declined doodle request. The gate is left as it is;
    /// the returned value is the unchanged doodle state.
    #[must_use]
    pub fn decline_doodle(&self) -> DoodleReveal {
        self.doodle
    }

    /// Records an answer to the question. Returns `true` if this changed
    /// state.
    pub fn answer_valentine(&mut self) -> bool {
        !std::mem::replace(&mut self.valentine_answered, true)
    }

    /// Reveals the hidden message. Returns `true` if this changed state.
    pub fn reveal_secret(&mut self) -> bool {
        !std::mem::replace(&mut self.secret_revealed, true)
    }

    /// Returns every gate to its default. Only a story restart does this.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
