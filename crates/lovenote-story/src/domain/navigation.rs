//! Navigation controller: the current page and restart.

use serde::Serialize;

use super::gates::RevealGateSet;
use super::page::Page;

/// Owns the current page.
///
/// `advance` knows nothing about reveal gates; the story session consults
/// the advancement policy before calling it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationController {
    current_page: Page,
}

impl NavigationController {
    /// A controller on the first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current page.
    #[must_use]
    pub fn current_page(&self) -> Page {
        self.current_page
    }

    /// Moves forward by one page. On the terminal page this is a no-op.
    /// Returns the resulting page.
    pub fn advance(&mut self) -> Page {
        if let Some(next) = self.current_page.next() {
            self.current_page = next;
        }
        self.current_page
    }

    /// Returns to the first page and resets every gate in `gates`.
    pub fn restart(&mut self, gates: &mut RevealGateSet) {
        self.current_page = Page::FIRST;
        gates.reset();
    }
}
