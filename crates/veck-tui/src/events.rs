//! Events consumed by the reducer.
//!
//! Terminal input and async handler results all arrive as `UiEvent`s.
//! Errors cross the channel as pre-formatted strings (`{e:#}`) so events
//! stay cheap to construct and inspect in tests.

use veck_api::client::RestoreRequest;
use veck_api::{Message, SearchResult, Session};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic heartbeat. Drives undo-window expiry and render batching.
    Tick,
    /// Emitted once per loop iteration with the current terminal size, before
    /// any other event, so layout-dependent state is fresh.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    SessionsLoaded(Result<Vec<Session>, String>),
    SessionCreated(Result<Session, String>),
    /// A delete finished. Carries the pre-delete snapshot so the reducer can
    /// arm the undo slot on success.
    SessionDeleted {
        session: Session,
        messages: Vec<Message>,
        remove_vectors: bool,
        result: Result<(), String>,
    },
    SessionRestored {
        request: RestoreRequest,
        result: Result<(), String>,
    },

    /// A page of messages arrived. `generation` is the feed generation at
    /// dispatch time; stale responses are discarded.
    MessagesLoaded {
        session_id: String,
        generation: u64,
        offset: usize,
        replace: bool,
        result: Result<Vec<Message>, String>,
    },
    /// The user's message was persisted server-side (first step of the send
    /// chain); append it now, not optimistically.
    UserMessagePersisted {
        session_id: String,
        generation: u64,
        message: Message,
    },
    /// The assistant reply was generated and persisted (end of the chain).
    ReplyPersisted {
        session_id: String,
        generation: u64,
        message: Message,
    },
    /// Any step of the send chain failed. Already-appended messages stay.
    SendFailed {
        session_id: String,
        generation: u64,
        error: String,
    },

    SearchFinished(Result<Vec<SearchResult>, String>),
}
