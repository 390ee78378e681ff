//! Command abstractions.

use uuid::Uuid;

/// Trait that all commands implement.
pub trait Command: std::fmt::Debug {
    /// The type name for this command (for logging).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through its events.
    fn correlation_id(&self) -> Uuid;
}
