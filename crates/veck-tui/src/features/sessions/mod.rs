//! Session sidebar: the list of sessions and the delete/undo flow.

pub mod render;
mod state;
mod update;

pub use state::{PendingUndo, SNAPSHOT_MESSAGE_LIMIT, SessionsState, UNDO_WINDOW};
pub use update::{
    expire_pending_undo, handle_created, handle_deleted, handle_loaded, handle_restored,
    open_cursor_session, refresh, request_undo,
};
