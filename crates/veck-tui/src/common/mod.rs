//! Shared helpers used across features and overlays.

mod text;

pub use text::{truncate_end_with_ellipsis, truncate_start_with_ellipsis, wrap_text};
