//! Effect handlers: pure async functions that perform the HTTP work and
//! return the `UiEvent` describing the outcome. The runtime spawns them and
//! routes the returned event into the inbox.

use std::sync::Arc;

use tracing::warn;
use veck_api::ApiClient;
use veck_api::client::RestoreRequest;
use veck_api::{Sender, Session};

use super::inbox::UiEventSender;
use crate::events::UiEvent;
use crate::features::feed::PAGE_SIZE;
use crate::features::sessions::SNAPSHOT_MESSAGE_LIMIT;

pub async fn load_sessions(client: Arc<ApiClient>) -> UiEvent {
    let result = client.list_sessions().await.map_err(|e| format!("{e:#}"));
    if let Err(e) = &result {
        warn!("list sessions failed: {e}");
    }
    UiEvent::SessionsLoaded(result)
}

pub async fn create_session(client: Arc<ApiClient>, title: Option<String>) -> UiEvent {
    let result = client
        .create_session(title.as_deref())
        .await
        .map_err(|e| format!("{e:#}"));
    if let Err(e) = &result {
        warn!("create session failed: {e}");
    }
    UiEvent::SessionCreated(result)
}

/// Snapshot-then-delete.
///
/// The snapshot fetch is best effort: a failure is logged and yields an
/// empty message list, never a blocked delete. Undoing a delete whose
/// snapshot failed restores the session row without its messages.
pub async fn delete_session(
    client: Arc<ApiClient>,
    session: Session,
    remove_vectors: bool,
) -> UiEvent {
    let messages = match client
        .list_messages(&session.id, SNAPSHOT_MESSAGE_LIMIT, 0)
        .await
    {
        Ok(messages) => messages,
        Err(e) => {
            warn!(id = %session.id, "pre-delete snapshot failed: {e:#}");
            Vec::new()
        }
    };

    let result = client
        .delete_session(&session.id, remove_vectors)
        .await
        .map_err(|e| format!("{e:#}"));
    if let Err(e) = &result {
        warn!(id = %session.id, "delete session failed: {e}");
    }
    UiEvent::SessionDeleted {
        session,
        messages,
        remove_vectors,
        result,
    }
}

pub async fn restore_session(client: Arc<ApiClient>, request: RestoreRequest) -> UiEvent {
    let result = client
        .restore_session(&request)
        .await
        .map_err(|e| format!("{e:#}"));
    if let Err(e) = &result {
        warn!(id = %request.session.id, "restore session failed: {e}");
    }
    UiEvent::SessionRestored { request, result }
}

pub async fn load_messages(
    client: Arc<ApiClient>,
    session_id: String,
    generation: u64,
    offset: usize,
    replace: bool,
) -> UiEvent {
    let result = client
        .list_messages(&session_id, PAGE_SIZE, offset)
        .await
        .map_err(|e| format!("{e:#}"));
    if let Err(e) = &result {
        warn!(id = %session_id, offset, "load messages failed: {e}");
    }
    UiEvent::MessagesLoaded {
        session_id,
        generation,
        offset,
        replace,
        result,
    }
}

/// The three-step send chain: persist the user message, generate a reply,
/// persist the reply. Intermediate progress (the persisted user message)
/// goes straight to the inbox; the final event is returned.
pub async fn send_message(
    client: Arc<ApiClient>,
    tx: UiEventSender,
    session_id: String,
    generation: u64,
    text: String,
) -> UiEvent {
    let user_message = match client.post_message(&session_id, Sender::User, &text).await {
        Ok(message) => message,
        Err(e) => {
            warn!(id = %session_id, "persist user message failed: {e:#}");
            return UiEvent::SendFailed {
                session_id,
                generation,
                error: format!("{e:#}"),
            };
        }
    };
    let _ = tx.send(UiEvent::UserMessagePersisted {
        session_id: session_id.clone(),
        generation,
        message: user_message,
    });

    let reply = match client.generate(&text).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(id = %session_id, "generate reply failed: {e:#}");
            return UiEvent::SendFailed {
                session_id,
                generation,
                error: format!("{e:#}"),
            };
        }
    };

    match client
        .post_message(&session_id, Sender::Assistant, &reply)
        .await
    {
        Ok(message) => UiEvent::ReplyPersisted {
            session_id,
            generation,
            message,
        },
        Err(e) => {
            warn!(id = %session_id, "persist reply failed: {e:#}");
            UiEvent::SendFailed {
                session_id,
                generation,
                error: format!("{e:#}"),
            }
        }
    }
}

pub async fn run_search(client: Arc<ApiClient>, query: String, threshold: f64) -> UiEvent {
    let result = client
        .search(&query, threshold)
        .await
        .map_err(|e| format!("{e:#}"));
    if let Err(e) = &result {
        warn!("search failed: {e}");
    }
    UiEvent::SearchFinished(result)
}
