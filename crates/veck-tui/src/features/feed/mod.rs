//! Message feed: paginated history plus the send chain for one session.

pub mod render;
mod state;
mod update;

pub use state::{FeedState, PAGE_SIZE, TOP_FETCH_THRESHOLD};
pub use update::{
    close, handle_messages_loaded, handle_reply_persisted, handle_send_failed,
    handle_user_persisted, open_session, relayout, scroll_down, scroll_up, try_send,
};
