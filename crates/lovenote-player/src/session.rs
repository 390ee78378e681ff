//! Input dispatch for a single player session.
//!
//! Each input line is parsed into an [`Input`], routed to the matching story
//! command handler, and answered with a fresh [`PageView`].

use std::io::{BufRead, Write};
use std::str::FromStr;

use lovenote_story::application::{command_handlers, query_handlers};
use lovenote_story::domain::commands;
use lovenote_story::domain::intents::{Intent, IntentParseError, ValentineAnswer};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::view::PageView;

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Re-render the current page without changing anything.
    Show,
    /// A reader intent.
    Intent(Intent),
}

impl FromStr for Input {
    type Err = IntentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("show") {
            return Ok(Input::Show);
        }
        s.parse().map(Input::Intent)
    }
}

/// A started story session and the state it runs against.
pub struct PlayerSession {
    state: AppState,
    session_id: Uuid,
}

impl PlayerSession {
    /// Starts a new story session on the first page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Domain` if the journal rejects the start event.
    #[instrument(skip_all)]
    pub fn start(mut state: AppState) -> Result<Self, AppError> {
        let command = commands::StartStory {
            correlation_id: Uuid::new_v4(),
        };
        let result = command_handlers::handle_start_story(
            &command,
            state.clock.as_ref(),
            &mut *state.journal,
        )?;
        info!(session_id = %result.aggregate_id, "player session started");
        Ok(Self {
            state,
            session_id: result.aggregate_id,
        })
    }

    /// The story session being played.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Renders the current page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Domain` if the session cannot be loaded.
    pub fn view(&self) -> Result<PageView, AppError> {
        self.render(None)
    }

    /// Runs `intent` against the session and renders the result. A recorded
    /// decline carries the script's decline feedback.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Domain` if the handler fails.
    #[instrument(skip_all, fields(session_id = %self.session_id, intent = %intent))]
    pub fn dispatch(&mut self, intent: Intent) -> Result<PageView, AppError> {
        let correlation_id = Uuid::new_v4();
        let session_id = self.session_id;
        let clock = self.state.clock.as_ref();
        let journal = &mut *self.state.journal;

        let result = match intent {
            Intent::Advance => command_handlers::handle_advance_page(
                &commands::AdvancePage {
                    correlation_id,
                    session_id,
                },
                clock,
                journal,
            ),
            Intent::Restart => command_handlers::handle_restart_story(
                &commands::RestartStory {
                    correlation_id,
                    session_id,
                },
                clock,
                journal,
            ),
            Intent::OpenEnvelope => command_handlers::handle_open_envelope(
                &commands::OpenEnvelope {
                    correlation_id,
                    session_id,
                },
                clock,
                journal,
            ),
            Intent::RequestDoodle => command_handlers::handle_request_doodle(
                &commands::RequestDoodle {
                    correlation_id,
                    session_id,
                },
                clock,
                journal,
            ),
            Intent::DeclineDoodle => command_handlers::handle_decline_doodle(
                &commands::DeclineDoodle {
                    correlation_id,
                    session_id,
                },
                clock,
                journal,
            ),
            Intent::AnswerYes => command_handlers::handle_answer_valentine(
                &commands::AnswerValentine {
                    correlation_id,
                    session_id,
                    answer: ValentineAnswer::Yes,
                },
                clock,
                journal,
            ),
            Intent::AnswerOfCourse => command_handlers::handle_answer_valentine(
                &commands::AnswerValentine {
                    correlation_id,
                    session_id,
                    answer: ValentineAnswer::OfCourse,
                },
                clock,
                journal,
            ),
            Intent::RevealSecret => command_handlers::handle_reveal_secret(
                &commands::RevealSecret {
                    correlation_id,
                    session_id,
                },
                clock,
                journal,
            ),
        }?;

        debug!(
            %correlation_id,
            page = %result.current_page,
            had_effect = result.had_effect(),
            "intent dispatched"
        );

        let feedback = (intent == Intent::DeclineDoodle && result.had_effect())
            .then(|| self.state.script.decline_feedback().to_owned());
        self.render(feedback)
    }

    /// Handles one input line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Intent` for unrecognised text, otherwise as
    /// [`PlayerSession::dispatch`].
    pub fn handle_line(&mut self, line: &str) -> Result<Option<PageView>, AppError> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        match line.parse::<Input>()? {
            Input::Show => self.view().map(Some),
            Input::Intent(intent) => self.dispatch(intent).map(Some),
        }
    }

    fn render(&self, feedback: Option<String>) -> Result<PageView, AppError> {
        let story = query_handlers::get_story_by_id(self.session_id, &*self.state.journal)?;
        Ok(PageView::render(&self.state.script, story, feedback))
    }
}

/// Writes the opening view, then answers every line of `input` with a view
/// or an error line until `input` is exhausted.
///
/// # Errors
///
/// Returns the first unrecoverable error: I/O or serialization failures, or
/// a journal failure while rendering the opening view.
pub fn run<R: BufRead, W: Write>(
    session: &mut PlayerSession,
    input: R,
    mut output: W,
) -> Result<(), AppError> {
    write_json_line(&mut output, &session.view()?)?;

    for line in input.lines() {
        let line = line?;
        match session.handle_line(&line) {
            Ok(Some(view)) => write_json_line(&mut output, &view)?,
            Ok(None) => {}
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, code = err.error_code(), "input rejected");
                write_json_line(&mut output, &ErrorBody::from(&err))?;
            }
            Err(err) => return Err(err),
        }
    }

    info!(session_id = %session.session_id(), "input closed");
    Ok(())
}

fn write_json_line<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<(), AppError> {
    serde_json::to_writer(&mut *output, value)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
