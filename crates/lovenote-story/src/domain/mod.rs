//! Domain model for the page-flow context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod gates;
pub mod intents;
pub mod navigation;
pub mod page;
pub mod policy;
