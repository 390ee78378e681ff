//! Shared player state.

use std::path::Path;

use lovenote_content::Script;
use lovenote_core::clock::Clock;
use lovenote_core::journal::EventJournal;
use tracing::info;

use crate::error::AppError;

/// Everything a player session needs to run handlers and render views.
pub struct AppState {
    /// Timestamps for recorded events.
    pub clock: Box<dyn Clock>,
    /// Session-scoped event journal.
    pub journal: Box<dyn EventJournal>,
    /// The narrative script.
    pub script: Script,
}

impl AppState {
    /// Create new player state.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, journal: Box<dyn EventJournal>, script: Script) -> Self {
        Self {
            clock,
            journal,
            script,
        }
    }
}

/// Loads the script at `script_path`, or the built-in script when no path is
/// configured.
///
/// # Errors
///
/// Returns `AppError::Config` for an empty path and `AppError::Content` if
/// the script cannot be read or fails validation.
pub fn load_script(script_path: Option<&str>) -> Result<Script, AppError> {
    let script = match script_path {
        None => Script::builtin()?,
        Some(path) if path.trim().is_empty() => {
            return Err(AppError::Config(
                "LOVENOTE_SCRIPT must not be empty".to_owned(),
            ));
        }
        Some(path) => Script::from_path(Path::new(path))?,
    };
    info!(
        title = script.title(),
        version_hash = script.version_hash(),
        "script loaded"
    );
    Ok(script)
}
