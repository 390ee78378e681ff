//! The page view written for each handled input line.

use lovenote_content::{Image, Reveal, Script};
use lovenote_story::application::query_handlers::StoryView;
use lovenote_story::domain::intents::Intent;
use lovenote_story::domain::page::Page;
use lovenote_story::domain::policy::Advancement;
use serde::Serialize;

/// One offered action with the label the script gives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionView {
    /// The intent to send back.
    pub intent: Intent,
    /// Button text. Falls back to the intent name when the script has none.
    pub label: String,
}

/// Everything the presentation layer draws for the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// The current page.
    pub page: Page,
    /// Headline text.
    pub heading: String,
    /// Lines always shown.
    pub lines: Vec<String>,
    /// Image always shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Content unlocked by the page's reveal gate, once satisfied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed: Option<Reveal>,
    /// Actions to offer, in policy order.
    pub actions: Vec<ActionView>,
    /// Transient message for the last input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Session state behind the page.
    pub story: StoryView,
}

impl PageView {
    /// Renders `story` against `script`.
    #[must_use]
    pub fn render(script: &Script, story: StoryView, feedback: Option<String>) -> Self {
        let content = script.page(story.current_page);
        let revealed = match story.advancement {
            Advancement::Gated(gate) if story.gates.is_satisfied(gate) => content.revealed.clone(),
            _ => None,
        };
        let actions = story
            .offered_intents
            .iter()
            .map(|&intent| ActionView {
                intent,
                label: content
                    .label(intent)
                    .map_or_else(|| intent.name().to_owned(), str::to_owned),
            })
            .collect();

        Self {
            page: story.current_page,
            heading: content.heading.clone(),
            lines: content.lines.clone(),
            image: content.image.clone(),
            revealed,
            actions,
            feedback,
            story,
        }
    }
}

#[cfg(test)]
mod tests {
    use lovenote_story::domain::gates::{GateKind, RevealGateSet};
    use lovenote_story::domain::page::PAGE_COUNT;
    use lovenote_story::domain::policy;
    use uuid::Uuid;

    use super::*;

    fn story(page: Page, gates: RevealGateSet) -> StoryView {
        let advancement = policy::advancement(page);
        StoryView {
            session_id: Uuid::new_v4(),
            current_page: page,
            page_count: PAGE_COUNT,
            gates,
            advancement,
            can_advance: policy::can_advance(page, &gates),
            is_terminal: advancement == Advancement::Terminal,
            offered_intents: policy::offered_intents(page, &gates),
            version: 1,
        }
    }

    #[test]
    fn test_closed_gate_hides_revealed_content() {
        let script = Script::builtin().unwrap();

        let view = PageView::render(&script, story(Page::Letter, RevealGateSet::new()), None);

        assert!(view.revealed.is_none());
        assert_eq!(view.actions.len(), 1);
        assert_eq!(view.actions[0].intent, Intent::OpenEnvelope);
        assert_eq!(view.actions[0].label, "Open the envelope");
    }

    #[test]
    fn test_satisfied_gate_shows_revealed_content() {
        let script = Script::builtin().unwrap();
        let mut gates = RevealGateSet::new();
        assert!(gates.open_envelope());

        let view = PageView::render(&script, story(Page::Letter, gates), None);

        let revealed = view.revealed.unwrap();
        assert_eq!(revealed.image.unwrap().alt, "Love Photo");
        assert_eq!(view.actions[0].intent, Intent::Advance);
        assert_eq!(view.actions[0].label, "Next →");
    }

    #[test]
    fn test_gate_on_another_page_does_not_leak_content() {
        let script = Script::builtin().unwrap();
        let mut gates = RevealGateSet::new();
        assert!(gates.reveal_secret());

        let view = PageView::render(&script, story(Page::Memories, gates), None);

        assert!(view.revealed.is_none());
        assert!(gates.is_satisfied(GateKind::Secret));
    }

    #[test]
    fn test_ending_offers_restart_with_label() {
        let script = Script::builtin().unwrap();

        let view = PageView::render(&script, story(Page::Ending, RevealGateSet::new()), None);

        assert_eq!(
            view.actions,
            vec![ActionView {
                intent: Intent::Restart,
                label: "Start Again ↺".to_owned(),
            }]
        );
        assert!(view.image.is_some());
    }

    #[test]
    fn test_view_serializes_without_empty_optionals() {
        let script = Script::builtin().unwrap();

        let view = PageView::render(&script, story(Page::Reasons, RevealGateSet::new()), None);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["page"], 3);
        assert_eq!(json["heading"], "Why I Love You");
        assert!(json.get("revealed").is_none());
        assert!(json.get("feedback").is_none());
        assert_eq!(json["actions"][0]["intent"], "advance");
        assert_eq!(json["story"]["current_page"], 3);
    }
}
