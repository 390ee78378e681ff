//! Lovenote player: error types.

use lovenote_content::ContentError;
use lovenote_core::error::DomainError;
use lovenote_story::domain::intents::IntentParseError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the player.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The narrative script could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// A story handler failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The input line does not name an intent.
    #[error(transparent)]
    Intent(#[from] IntentParseError),

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A view could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Content(_) => "content_error",
            AppError::Domain(DomainError::AggregateNotFound(_)) => "aggregate_not_found",
            AppError::Domain(DomainError::ConcurrencyConflict { .. }) => "concurrency_conflict",
            AppError::Domain(DomainError::Validation(_)) => "validation_error",
            AppError::Domain(DomainError::Infrastructure(_)) => "infrastructure_error",
            AppError::Intent(_) => "unknown_intent",
            AppError::Io(_) => "io_error",
            AppError::Json(_) => "json_error",
        }
    }

    /// Whether the session can keep reading input after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Domain(_) | AppError::Intent(_))
    }
}

/// JSON body written in place of a view when an input line fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.error_code(),
            message: err.to_string(),
        }
    }
}
