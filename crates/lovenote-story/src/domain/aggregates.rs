//! Aggregate roots for the page-flow context.

use lovenote_core::aggregate::AggregateRoot;
use lovenote_core::clock::Clock;
use lovenote_core::error::DomainError;
use lovenote_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    GateTouched, PageAdvanced, StoryEvent, StoryEventKind, StoryRestarted, StoryStarted,
};
use super::gates::{DoodleReveal, GateKind, RevealGateSet};
use super::intents::{Intent, ValentineAnswer};
use super::navigation::NavigationController;
use super::page::Page;
use super::policy::{self, Advancement};

/// The aggregate root for one reader's pass through the story.
///
/// Composes the [`NavigationController`] and the [`RevealGateSet`]. Every
/// effective intent is recorded as a [`StoryEvent`] and applied at once;
/// intents with no effect record nothing.
#[derive(Debug)]
pub struct StorySession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    pub(crate) navigation: NavigationController,
    pub(crate) gates: RevealGateSet,
    /// Events recorded since the last journal append.
    uncommitted_events: Vec<StoryEvent>,
}

impl StorySession {
    /// Creates a session on the first page with every gate at its default.
    /// Nothing is recorded until [`StorySession::start`].
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            navigation: NavigationController::new(),
            gates: RevealGateSet::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// The current page.
    #[must_use]
    pub fn current_page(&self) -> Page {
        self.navigation.current_page()
    }

    /// The reveal gates.
    #[must_use]
    pub fn gates(&self) -> &RevealGateSet {
        &self.gates
    }

    /// The advancement rule of the current page.
    #[must_use]
    pub fn advancement(&self) -> Advancement {
        policy::advancement(self.current_page())
    }

    /// Whether `advance` would move to the next page right now.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        policy::can_advance(self.current_page(), &self.gates)
    }

    /// Whether the story is resting on its final page.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.current_page().is_last()
    }

    /// The intents to offer the reader on the current page.
    #[must_use]
    pub fn offered_intents(&self) -> Vec<Intent> {
        policy::offered_intents(self.current_page(), &self.gates)
    }

    /// Starts the session, producing a `StoryStarted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the session already has history.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.version != 0 {
            return Err(DomainError::Validation(
                "story session has already started".to_owned(),
            ));
        }
        self.record(
            StoryEventKind::StoryStarted(StoryStarted {
                session_id: self.id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Moves to the next page if the current page's gate allows it.
    ///
    /// Blocked and terminal pages are left unchanged and nothing is
    /// recorded. Returns the resulting page.
    pub fn advance(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Page {
        let from = self.current_page();
        if !self.can_advance() {
            return from;
        }
        let Some(to) = from.next() else {
            return from;
        };
        self.record(
            StoryEventKind::PageAdvanced(PageAdvanced {
                session_id: self.id,
                from,
                to,
            }),
            correlation_id,
            clock,
        );
        self.current_page()
    }

    /// Returns to the first page with every gate reset, as one event.
    ///
    /// A session already at its initial state records nothing.
    pub fn restart(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let from = self.current_page();
        if from == Page::FIRST && self.gates.is_default() {
            return;
        }
        self.record(
            StoryEventKind::StoryRestarted(StoryRestarted {
                session_id: self.id,
                from,
            }),
            correlation_id,
            clock,
        );
    }

    /// Opens the envelope. Only takes effect on the envelope's page.
    /// Returns `true` if this changed state.
    pub fn open_envelope(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if !self.is_on_page_of(GateKind::Envelope) || self.gates.envelope_open() {
            return false;
        }
        let payload = self.gate_touched();
        self.record(StoryEventKind::EnvelopeOpened(payload), correlation_id, clock);
        true
    }

    /// Shows the doodle. Only takes effect on the doodle's page. Returns
    /// `true` if this changed state.
    pub fn request_doodle(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if !self.is_on_page_of(GateKind::Doodle) || self.gates.doodle() == DoodleReveal::Shown {
            return false;
        }
        let payload = self.gate_touched();
        self.record(StoryEventKind::DoodleRequested(payload), correlation_id, clock);
        true
    }

    /// Declines the doodle. While the doodle is undecided on its own page the
    /// decline is recorded so the presentation can respond to it, but the
    /// gate does not move. Returns the unchanged doodle state.
    pub fn decline_doodle(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> DoodleReveal {
        if self.is_on_page_of(GateKind::Doodle) && self.gates.doodle() == DoodleReveal::Undecided {
            let payload = self.gate_touched();
            self.record(StoryEventKind::DoodleDeclined(payload), correlation_id, clock);
        }
        self.gates.decline_doodle()
    }

    /// Answers the question. Either affirmative option has the same effect.
    /// Only takes effect on the question's page. Returns `true` if this
    /// changed state.
    pub fn answer_valentine(
        &mut self,
        _answer: ValentineAnswer,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> bool {
        if !self.is_on_page_of(GateKind::Valentine) || self.gates.valentine_answered() {
            return false;
        }
        let payload = self.gate_touched();
        self.record(StoryEventKind::ValentineAnswered(payload), correlation_id, clock);
        true
    }

    /// Reveals the hidden message. Only takes effect on the secret's page.
    /// Returns `true` if this changed state.
    pub fn reveal_secret(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if !self.is_on_page_of(GateKind::Secret) || self.gates.secret_revealed() {
            return false;
        }
        let payload = self.gate_touched();
        self.record(StoryEventKind::SecretRevealed(payload), correlation_id, clock);
        true
    }

    /// Applies a journaled event after checking it continues from the
    /// current state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the event does not follow
    /// from the current page, which means the journal is out of order or
    /// missing events.
    pub(crate) fn replay(&mut self, event: &StoryEvent) -> Result<(), DomainError> {
        let current = self.current_page();
        let consistent = match &event.kind {
            StoryEventKind::StoryStarted(_) => self.version == 0,
            StoryEventKind::PageAdvanced(advanced) => {
                advanced.from == current && current.next() == Some(advanced.to)
            }
            StoryEventKind::EnvelopeOpened(touched)
            | StoryEventKind::DoodleRequested(touched)
            | StoryEventKind::DoodleDeclined(touched)
            | StoryEventKind::ValentineAnswered(touched)
            | StoryEventKind::SecretRevealed(touched) => touched.page == current,
            StoryEventKind::StoryRestarted(restarted) => restarted.from == current,
        };
        if !consistent {
            return Err(DomainError::Infrastructure(format!(
                "event {} ({}) does not follow from page {current} at version {}",
                event.metadata.sequence_number, event.metadata.event_type, self.version
            )));
        }
        self.apply(event);
        Ok(())
    }

    fn is_on_page_of(&self, gate: GateKind) -> bool {
        self.current_page() == gate.page()
    }

    fn gate_touched(&self) -> GateTouched {
        GateTouched {
            session_id: self.id,
            page: self.current_page(),
        }
    }

    /// Wraps `kind` in an event, applies it, and queues it for the journal.
    fn record(&mut self, kind: StoryEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        // TODO: draw event ids from an injected generator so tests can assert
        // on them.
        let event = StoryEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.version + 1,
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

impl AggregateRoot for StorySession {
    type Event = StoryEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            StoryEventKind::StoryStarted(_) | StoryEventKind::DoodleDeclined(_) => {}
            StoryEventKind::PageAdvanced(_) => {
                self.navigation.advance();
            }
            StoryEventKind::EnvelopeOpened(_) => {
                self.gates.open_envelope();
            }
            StoryEventKind::DoodleRequested(_) => {
                self.gates.request_doodle();
            }
            StoryEventKind::ValentineAnswered(_) => {
                self.gates.answer_valentine();
            }
            StoryEventKind::SecretRevealed(_) => {
                self.gates.reveal_secret();
            }
            StoryEventKind::StoryRestarted(_) => {
                self.navigation.restart(&mut self.gates);
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lovenote_core::event::DomainEvent;
    use lovenote_test_support::{FixedClock, valentines_morning};

    fn started_session() -> (StorySession, FixedClock) {
        let clock = FixedClock(valentines_morning());
        let mut session = StorySession::new(Uuid::new_v4());
        session.start(Uuid::new_v4(), &clock).unwrap();
        session.take_uncommitted_events();
        (session, clock)
    }

    /// Drives the session to `target` by satisfying every gate on the way.
    fn walk_to(session: &mut StorySession, clock: &FixedClock, target: Page) {
        let cid = Uuid::new_v4();
        while session.current_page() < target {
            if let Advancement::Gated(gate) = session.advancement() {
                match gate {
                    GateKind::Envelope => {
                        session.open_envelope(cid, clock);
                    }
                    GateKind::Doodle => {
                        session.request_doodle(cid, clock);
                    }
                    GateKind::Valentine => {
                        session.answer_valentine(ValentineAnswer::Yes, cid, clock);
                    }
                    GateKind::Secret => {
                        session.reveal_secret(cid, clock);
                    }
                }
            }
            session.advance(cid, clock);
        }
        session.take_uncommitted_events();
    }

    #[test]
    fn test_start_produces_story_started_event() {
        // Arrange
        let session_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock(valentines_morning());
        let mut session = StorySession::new(session_id);

        // Act
        session.start(correlation_id, &clock).unwrap();

        // Assert
        let events = session.uncommitted_events();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.event_type(), "story.started");

        let meta = event.metadata();
        assert_eq!(meta.aggregate_id, session_id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.causation_id, correlation_id);
        assert_eq!(meta.occurred_at, valentines_morning());

        assert_eq!(session.current_page(), Page::Landing);
        assert!(session.gates().is_default());
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let (mut session, clock) = started_session();

        let result = session.start(Uuid::new_v4(), &clock);

        match result.unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("already started")),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_advance_from_ungated_pages_moves_one_page() {
        let (mut session, clock) = started_session();

        for (from, to) in [
            (Page::Landing, Page::Letter),
            (Page::Reasons, Page::Memories),
            (Page::LittleThings, Page::Question),
        ] {
            walk_to(&mut session, &clock, from);

            let page = session.advance(Uuid::new_v4(), &clock);

            assert_eq!(page, to);
            let events = session.take_uncommitted_events();
            assert_eq!(events.len(), 1);
            assert_eq!(
                events[0].kind,
                StoryEventKind::PageAdvanced(PageAdvanced {
                    session_id: session.id,
                    from,
                    to,
                })
            );
        }
    }

    #[test]
    fn test_advance_is_blocked_on_every_unsatisfied_gate() {
        for gated in [Page::Letter, Page::Memories, Page::Question, Page::Secret] {
            let (mut session, clock) = started_session();
            walk_to(&mut session, &clock, gated);
            let version = session.version();

            let page = session.advance(Uuid::new_v4(), &clock);

            assert_eq!(page, gated, "advance should be blocked on page {gated}");
            assert!(!session.can_advance());
            assert!(session.uncommitted_events().is_empty());
            assert_eq!(session.version(), version);
        }
    }

    #[test]
    fn test_advance_at_terminal_page_is_idempotent() {
        let (mut session, clock) = started_session();
        walk_to(&mut session, &clock, Page::Ending);
        let gates = *session.gates();
        let version = session.version();

        assert_eq!(session.advance(Uuid::new_v4(), &clock), Page::Ending);
        assert_eq!(session.advance(Uuid::new_v4(), &clock), Page::Ending);

        assert!(session.is_terminal());
        assert_eq!(*session.gates(), gates);
        assert_eq!(session.version(), version);
        assert!(session.uncommitted_events().is_empty());
        assert_eq!(session.offered_intents(), vec![Intent::Restart]);
    }

    #[test]
    fn test_latching_an_open_gate_again_records_nothing() {
        let (mut session, clock) = started_session();
        walk_to(&mut session, &clock, Page::Letter);

        assert!(session.open_envelope(Uuid::new_v4(), &clock));
        assert!(!session.open_envelope(Uuid::new_v4(), &clock));

        let events = session.take_uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "story.envelope_opened");
    }

    #[test]
    fn test_decline_doodle_is_recorded_but_keeps_the_gate_closed() {
        // Arrange
        let (mut session, clock) = started_session();
        walk_to(&mut session, &clock, Page::Memories);

        // Act
        let reveal = session.decline_doodle(Uuid::new_v4(), &clock);
        let page = session.advance(Uuid::new_v4(), &clock);

        // Assert
        assert_eq!(reveal, DoodleReveal::Undecided);
        assert_eq!(session.gates().doodle(), DoodleReveal::Undecided);
        assert_eq!(page, Page::Memories);

        let events = session.take_uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "story.doodle_declined");

        assert!(session.request_doodle(Uuid::new_v4(), &clock));
        assert_eq!(session.advance(Uuid::new_v4(), &clock), Page::LittleThings);
    }

    #[test]
    fn test_gate_setters_only_work_on_their_own_page() {
        // Arrange
        let (mut session, clock) = started_session();

        // Act
        let revealed = session.reveal_secret(Uuid::new_v4(), &clock);
        let opened = session.open_envelope(Uuid::new_v4(), &clock);
        let requested = session.request_doodle(Uuid::new_v4(), &clock);
        let answered = session.answer_valentine(ValentineAnswer::Yes, Uuid::new_v4(), &clock);

        // Assert
        assert!(!revealed && !opened && !requested && !answered);
        assert!(session.gates().is_default());
        assert!(session.uncommitted_events().is_empty());

        walk_to(&mut session, &clock, Page::Secret);
        assert!(!session.gates().secret_revealed());
        assert_eq!(session.offered_intents(), vec![Intent::RevealSecret]);
        assert_eq!(session.advance(Uuid::new_v4(), &clock), Page::Secret);
    }

    #[test]
    fn test_decline_records_only_while_the_doodle_is_undecided_on_its_page() {
        let (mut session, clock) = started_session();

        session.decline_doodle(Uuid::new_v4(), &clock);
        assert!(session.uncommitted_events().is_empty());

        walk_to(&mut session, &clock, Page::Memories);
        assert!(session.request_doodle(Uuid::new_v4(), &clock));
        session.take_uncommitted_events();

        let reveal = session.decline_doodle(Uuid::new_v4(), &clock);

        assert_eq!(reveal, DoodleReveal::Shown);
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_replay_rebuilds_state_and_rejects_gaps() {
        // Arrange
        let (mut source, clock) = started_session();
        walk_to(&mut source, &clock, Page::Reasons);
        let started = StoryEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: "story.started".to_owned(),
                aggregate_id: source.id,
                sequence_number: 1,
                correlation_id: Uuid::new_v4(),
                causation_id: Uuid::new_v4(),
                occurred_at: valentines_morning(),
            },
            kind: StoryEventKind::StoryStarted(StoryStarted {
                session_id: source.id,
            }),
        };
        let jump = StoryEvent {
            metadata: EventMetadata {
                sequence_number: 2,
                event_type: "story.page_advanced".to_owned(),
                ..started.metadata.clone()
            },
            kind: StoryEventKind::PageAdvanced(PageAdvanced {
                session_id: source.id,
                from: Page::Letter,
                to: Page::Reasons,
            }),
        };
        let mut replayed = StorySession::new(source.id);

        // Act
        replayed.replay(&started).unwrap();
        let result = replayed.replay(&jump);

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert_eq!(replayed.current_page(), Page::Landing);
        assert_eq!(replayed.version(), 1);
        assert!(replayed.replay(&started).is_err());
    }

    #[test]
    fn test_both_valentine_answers_are_equivalent() {
        let (mut yes, clock) = started_session();
        let (mut of_course, _) = started_session();
        walk_to(&mut yes, &clock, Page::Question);
        walk_to(&mut of_course, &clock, Page::Question);

        yes.answer_valentine(ValentineAnswer::Yes, Uuid::new_v4(), &clock);
        of_course.answer_valentine(ValentineAnswer::OfCourse, Uuid::new_v4(), &clock);

        assert_eq!(yes.gates(), of_course.gates());
        assert_eq!(yes.current_page(), of_course.current_page());
        assert_eq!(yes.version(), of_course.version());
        assert_eq!(
            yes.uncommitted_events()[0].to_payload()["ValentineAnswered"]["page"],
            of_course.uncommitted_events()[0].to_payload()["ValentineAnswered"]["page"]
        );
    }

    #[test]
    fn test_restart_after_full_traversal_resets_everything_in_one_event() {
        // Arrange
        let (mut session, clock) = started_session();
        walk_to(&mut session, &clock, Page::Ending);
        assert!(session.gates().is_satisfied(GateKind::Secret));

        // Act
        session.restart(Uuid::new_v4(), &clock);

        // Assert
        assert_eq!(session.current_page(), Page::Landing);
        assert!(session.gates().is_default());
        let events = session.take_uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            StoryEventKind::StoryRestarted(StoryRestarted {
                session_id: session.id,
                from: Page::Ending,
            })
        );
    }

    #[test]
    fn test_restart_from_initial_state_records_nothing() {
        let (mut session, clock) = started_session();

        session.restart(Uuid::new_v4(), &clock);

        assert_eq!(session.current_page(), Page::Landing);
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_gates_of_earlier_pages_survive_until_restart() {
        let (mut session, clock) = started_session();
        walk_to(&mut session, &clock, Page::Reasons);

        assert!(session.gates().envelope_open());
        assert!(session.can_advance());
    }

    #[test]
    fn test_sequence_numbers_follow_version() {
        let (mut session, clock) = started_session();

        session.advance(Uuid::new_v4(), &clock);
        session.open_envelope(Uuid::new_v4(), &clock);
        session.advance(Uuid::new_v4(), &clock);

        let sequence: Vec<i64> = session
            .uncommitted_events()
            .iter()
            .map(|e| e.metadata().sequence_number)
            .collect();
        assert_eq!(sequence, vec![2, 3, 4]);
        assert_eq!(session.committed_version(), 1);
    }
}
