//! Advancement policy: which pages hold the reader until a gate is satisfied.

use serde::Serialize;

use super::gates::{GateKind, RevealGateSet};
use super::intents::Intent;
use super::page::Page;

/// What a page requires before the story may move past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "gate")]
pub enum Advancement {
    /// Content is only displayed; the reader may always continue.
    Open,
    /// The reader must satisfy the gate first.
    Gated(GateKind),
    /// The resting page. Only restart is offered.
    Terminal,
}

/// The advancement rule for `page`.
#[must_use]
pub const fn advancement(page: Page) -> Advancement {
    match page {
        Page::Landing | Page::Reasons | Page::LittleThings => Advancement::Open,
        Page::Letter => Advancement::Gated(GateKind::Envelope),
        Page::Memories => Advancement::Gated(GateKind::Doodle),
        Page::Question => Advancement::Gated(GateKind::Valentine),
        Page::Secret => Advancement::Gated(GateKind::Secret),
        Page::Ending => Advancement::Terminal,
    }
}

/// Whether the story may advance from `page` given `gates`. Only the gate of
/// `page` itself is inspected.
#[must_use]
pub fn can_advance(page: Page, gates: &RevealGateSet) -> bool {
    match advancement(page) {
        Advancement::Open => true,
        Advancement::Gated(gate) => gates.is_satisfied(gate),
        Advancement::Terminal => false,
    }
}

/// The intents the presentation layer should offer on `page`.
#[must_use]
pub fn offered_intents(page: Page, gates: &RevealGateSet) -> Vec<Intent> {
    match advancement(page) {
        Advancement::Terminal => vec![Intent::Restart],
        Advancement::Open => vec![Intent::Advance],
        Advancement::Gated(gate) if gates.is_satisfied(gate) => vec![Intent::Advance],
        Advancement::Gated(GateKind::Envelope) => vec![Intent::OpenEnvelope],
        Advancement::Gated(GateKind::Doodle) => vec![Intent::RequestDoodle, Intent::DeclineDoodle],
        Advancement::Gated(GateKind::Valentine) => vec![Intent::AnswerYes, Intent::AnswerOfCourse],
        Advancement::Gated(GateKind::Secret) => vec![Intent::RevealSecret],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advancement_table() {
        let table: Vec<(u8, Advancement)> =
            Page::ALL.iter().map(|p| (p.number(), advancement(*p))).collect();

        assert_eq!(
            table,
            vec![
                (1, Advancement::Open),
                (2, Advancement::Gated(GateKind::Envelope)),
                (3, Advancement::Open),
                (4, Advancement::Gated(GateKind::Doodle)),
                (5, Advancement::Open),
                (6, Advancement::Gated(GateKind::Valentine)),
                (7, Advancement::Gated(GateKind::Secret)),
                (8, Advancement::Terminal),
            ]
        );
    }

    #[test]
    fn test_each_gate_sits_on_its_own_page() {
        for page in Page::ALL {
            if let Advancement::Gated(gate) = advancement(page) {
                assert_eq!(gate.page(), page);
            }
        }
    }

    #[test]
    fn test_can_advance_with_default_gates() {
        let gates = RevealGateSet::new();
        let allowed: Vec<u8> = Page::ALL
            .iter()
            .filter(|p| can_advance(**p, &gates))
            .map(|p| p.number())
            .collect();

        assert_eq!(allowed, vec![1, 3, 5]);
    }

    #[test]
    fn test_can_advance_only_inspects_the_current_pages_gate() {
        let mut gates = RevealGateSet::new();
        gates.open_envelope();

        assert!(can_advance(Page::Letter, &gates));
        assert!(!can_advance(Page::Memories, &gates));
        assert!(!can_advance(Page::Ending, &gates));
    }

    #[test]
    fn test_offered_intents_follow_gate_state() {
        let mut gates = RevealGateSet::new();

        assert_eq!(offered_intents(Page::Landing, &gates), vec![Intent::Advance]);
        assert_eq!(offered_intents(Page::Letter, &gates), vec![Intent::OpenEnvelope]);
        assert_eq!(
            offered_intents(Page::Memories, &gates),
            vec![Intent::RequestDoodle, Intent::DeclineDoodle]
        );
        assert_eq!(
            offered_intents(Page::Question, &gates),
            vec![Intent::AnswerYes, Intent::AnswerOfCourse]
        );
        assert_eq!(offered_intents(Page::Secret, &gates), vec![Intent::RevealSecret]);
        assert_eq!(offered_intents(Page::Ending, &gates), vec![Intent::Restart]);

        gates.open_envelope();
        gates.request_doodle();
        assert_eq!(offered_intents(Page::Letter, &gates), vec![Intent::Advance]);
        assert_eq!(offered_intents(Page::Memories, &gates), vec![Intent::Advance]);
    }
}
