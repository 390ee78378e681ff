//! Lovenote player entry point.

use std::env::VarError;
use std::error::Error;
use std::io;

use lovenote_core::clock::SystemClock;
use lovenote_core::journal::InMemoryEventJournal;
use lovenote_player::error::AppError;
use lovenote_player::session::{self, PlayerSession};
use lovenote_player::state::{self, AppState};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber. Stdout carries the views.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(io::stderr)
        .init();

    tracing::info!("Starting Lovenote player");

    // Read configuration from environment.
    let script_path = match std::env::var("LOVENOTE_SCRIPT") {
        Ok(path) => Some(path),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => {
            return Err(AppError::Config("LOVENOTE_SCRIPT must be valid UTF-8".to_owned()).into());
        }
    };
    let script = state::load_script(script_path.as_deref())?;

    // Build player state.
    let app_state = AppState::new(
        Box::new(SystemClock),
        Box::new(InMemoryEventJournal::new()),
        script,
    );

    let mut player = PlayerSession::start(app_state)?;
    session::run(&mut player, io::stdin().lock(), io::stdout().lock())?;

    Ok(())
}
