//! Lovenote: page-flow bounded context.
//!
//! Responsible for the fixed page sequence, the per-page reveal gates that
//! hold the reader on a page until they interact with it, and restart.

pub mod application;
pub mod domain;
