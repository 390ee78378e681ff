//! Lovenote: narrative content.
//!
//! Responsible for the static script the presentation layer renders: page
//! copy, images, and action labels. Content is read-only and has no bearing
//! on page flow.

pub mod error;
pub mod script;

pub use error::ContentError;
pub use script::{Image, PageContent, Reveal, Script};
