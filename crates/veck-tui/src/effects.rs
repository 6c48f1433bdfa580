//! Effects produced by the reducer and executed by the runtime.

use veck_api::client::RestoreRequest;
use veck_api::Session;

#[derive(Debug)]
pub enum UiEffect {
    Quit,
    LoadSessions,
    CreateSession {
        title: Option<String>,
    },
    /// Snapshot up to the message limit, then delete. The handler reports
    /// back with the snapshot attached (see `UiEvent::SessionDeleted`).
    DeleteSession {
        session: Session,
        remove_vectors: bool,
    },
    RestoreSession {
        request: RestoreRequest,
    },
    LoadMessages {
        session_id: String,
        generation: u64,
        offset: usize,
        replace: bool,
    },
    /// Runs the three-step send chain: persist user message, generate a
    /// reply, persist the reply.
    SendMessage {
        session_id: String,
        generation: u64,
        text: String,
    },
    RunSearch {
        query: String,
        threshold: f64,
    },
}
