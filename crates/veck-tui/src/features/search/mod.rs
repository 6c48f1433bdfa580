//! Semantic search panel: query in, scored prompt/response pairs out.

pub mod render;
mod state;
mod update;

pub use state::{DEFAULT_THRESHOLD, SearchState, THRESHOLD_STEP};
pub use update::{adjust_threshold, handle_finished, submit};
