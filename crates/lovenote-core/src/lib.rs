//! Lovenote Core: shared domain abstractions.
//!
//! This crate defines the traits and types the story context builds on:
//! aggregates, commands, events, the clock, and the session journal.
//! It contains no presentation code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod journal;
