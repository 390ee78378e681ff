//! Lovenote player: a headless stand-in for the presentation layer.
//!
//! Reads one intent per line, hands it to the story handlers, and writes the
//! resulting page view as a JSON line.

pub mod error;
pub mod session;
pub mod state;
pub mod view;
