//! The fixed page sequence.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of pages in the script.
pub const PAGE_COUNT: u8 = 8;

/// One narrative screen. Pages are totally ordered by their number in
/// `1..=PAGE_COUNT` and the sequence never changes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Page {
    /// The special-delivery landing screen.
    #[default]
    Landing = 1,
    /// The sealed envelope.
    Letter = 2,
    /// Reasons, shown as cards.
    Reasons = 3,
    /// Memories, with the optional doodle reveal.
    Memories = 4,
    /// The list of little things.
    LittleThings = 5,
    /// The question.
    Question = 6,
    /// The hidden message.
    Secret = 7,
    /// The resting page; only restart leaves it.
    Ending = 8,
}

/// Returned when a number does not name a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page {0} is outside 1..={max}", max = PAGE_COUNT)]
pub struct PageOutOfRange(pub u8);

impl Page {
    /// The page every session starts on.
    pub const FIRST: Page = Page::Landing;

    /// The terminal page.
    pub const LAST: Page = Page::Ending;

    /// Every page in script order.
    pub const ALL: [Page; PAGE_COUNT as usize] = [
        Page::Landing,
        Page::Letter,
        Page::Reasons,
        Page::Memories,
        Page::LittleThings,
        Page::Question,
        Page::Secret,
        Page::Ending,
    ];

    /// Returns the page with the given 1-based number.
    #[must_use]
    pub const fn new(number: u8) -> Option<Page> {
        match number {
            1 => Some(Page::Landing),
            2 => Some(Page::Letter),
            3 => Some(Page::Reasons),
            4 => Some(Page::Memories),
            5 => Some(Page::LittleThings),
            6 => Some(Page::Question),
            7 => Some(Page::Secret),
            8 => Some(Page::Ending),
            _ => None,
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// The page after this one, or `None` on the terminal page.
    #[must_use]
    pub const fn next(self) -> Option<Page> {
        Page::new(self.number() + 1)
    }

    /// Whether this is the terminal page.
    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, Page::Ending)
    }
}

impl TryFrom<u8> for Page {
    type Error = PageOutOfRange;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Page::new(number).ok_or(PageOutOfRange(number))
    }
}

impl From<Page> for u8 {
    fn from(page: Page) -> Self {
        page.number()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
