//! Shared test helpers for player integration tests.
#![allow(dead_code)]

use lovenote_content::Script;
use lovenote_core::journal::InMemoryEventJournal;
use lovenote_player::session::{self, PlayerSession};
use lovenote_player::state::AppState;
use lovenote_test_support::{FixedClock, valentines_morning};

/// Start a session on the built-in script with a fixed clock and an
/// in-memory journal. Uses the same wiring as `main.rs`.
pub fn build_test_session() -> PlayerSession {
    build_test_session_with_script(Script::builtin().unwrap())
}

/// Start a session on `script`.
pub fn build_test_session_with_script(script: Script) -> PlayerSession {
    let app_state = AppState::new(
        Box::new(FixedClock(valentines_morning())),
        Box::new(InMemoryEventJournal::new()),
        script,
    );
    PlayerSession::start(app_state).unwrap()
}

/// Feed `lines` through the player loop and return every JSON line written,
/// starting with the opening view.
pub fn play(session: &mut PlayerSession, lines: &[&str]) -> Vec<serde_json::Value> {
    let input = lines.join("\n");
    let mut output = Vec::new();
    session::run(session, input.as_bytes(), &mut output).unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// The intent names offered by a view, in order.
pub fn offered(view: &serde_json::Value) -> Vec<String> {
    view["actions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|action| action["intent"].as_str().unwrap().to_owned())
        .collect()
}
