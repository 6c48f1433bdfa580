//! Feature slices: each owns its state, reducer functions, and rendering.

pub mod feed;
pub mod search;
pub mod sessions;
