//! Subcommand handlers.

pub mod config;
pub mod search;
pub mod sessions;
