//! Reducer functions for the session list and the delete/undo flow.
//!
//! The flow is the one stateful sequence in the app:
//! Idle -> ConfirmPending (overlay) -> Deleting -> UndoOffered -> Restored
//! or Expired. Expiry is an explicit transition driven by Tick, never a
//! background timer.

use std::time::Instant;

use veck_api::client::RestoreRequest;
use veck_api::{Message, Session};

use super::state::{PendingUndo, UNDO_WINDOW};
use crate::effects::UiEffect;
use crate::features::feed;
use crate::state::TuiState;

pub fn refresh(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.sessions.loading = true;
    vec![UiEffect::LoadSessions]
}

pub fn handle_loaded(tui: &mut TuiState, result: Result<Vec<Session>, String>) {
    tui.sessions.loading = false;
    match result {
        Ok(sessions) => {
            tui.sessions.set_sessions(sessions);
            tui.sessions.error = None;
        }
        Err(_) => {
            tui.sessions.error = Some("Failed to load sessions.".to_string());
        }
    }
}

/// A new session was created: select it and open its (empty) feed.
pub fn handle_created(tui: &mut TuiState, result: Result<Session, String>) -> Vec<UiEffect> {
    match result {
        Ok(session) => {
            let id = session.id.clone();
            tui.sessions.sessions.push(session);
            tui.sessions.cursor = tui.sessions.sessions.len() - 1;
            tui.sessions.open_id = Some(id.clone());
            tui.sessions.error = None;
            let mut effects = feed::open_session(&mut tui.feed, id);
            effects.push(UiEffect::LoadSessions);
            effects
        }
        Err(_) => {
            tui.sessions.error = Some("Failed to create session.".to_string());
            vec![]
        }
    }
}

/// Opens the session under the cursor, replacing the current feed.
pub fn open_cursor_session(tui: &mut TuiState) -> Vec<UiEffect> {
    let Some(session) = tui.sessions.cursor_session() else {
        return vec![];
    };
    let id = session.id.clone();
    if tui.sessions.open_id.as_deref() == Some(id.as_str()) {
        return vec![];
    }
    tui.sessions.open_id = Some(id.clone());
    feed::open_session(&mut tui.feed, id)
}

/// A delete finished. On success, arm the undo slot (overwriting any
/// predecessor: last delete wins) and drop the session from the list.
pub fn handle_deleted(
    tui: &mut TuiState,
    session: Session,
    messages: Vec<Message>,
    remove_vectors: bool,
    result: Result<(), String>,
    now: Instant,
) -> Vec<UiEffect> {
    if result.is_err() {
        tui.sessions.error = Some("Failed to delete session.".to_string());
        return vec![];
    }

    let deleted_id = session.id.clone();
    tui.sessions.pending_undo = Some(PendingUndo {
        session,
        messages,
        remove_vectors,
        expires_at: now + UNDO_WINDOW,
    });

    tui.sessions
        .set_sessions_retaining(|s| s.id != deleted_id);
    if tui.sessions.open_id.as_deref() == Some(deleted_id.as_str()) {
        tui.sessions.open_id = None;
        feed::close(&mut tui.feed);
    }
    vec![UiEffect::LoadSessions]
}

/// Fires the restore for the pending undo, if one is still live.
///
/// The slot is consumed immediately: whether the restore succeeds or fails,
/// there is no second attempt.
pub fn request_undo(tui: &mut TuiState, now: Instant) -> Vec<UiEffect> {
    let Some(pending) = tui.sessions.pending_undo.take() else {
        return vec![];
    };
    if pending.expires_at <= now {
        return vec![];
    }
    let request = RestoreRequest {
        session: pending.session,
        messages: pending.messages,
        restore_vectors: !pending.remove_vectors,
    };
    vec![UiEffect::RestoreSession { request }]
}

pub fn handle_restored(tui: &mut TuiState, result: Result<(), String>) -> Vec<UiEffect> {
    match result {
        Ok(()) => refresh(tui),
        Err(_) => {
            tui.sessions.error = Some("Failed to restore session.".to_string());
            vec![]
        }
    }
}

/// Tick observer: clears the undo slot once its deadline has passed.
pub fn expire_pending_undo(tui: &mut TuiState, now: Instant) {
    if let Some(pending) = &tui.sessions.pending_undo
        && pending.expires_at <= now
    {
        tui.sessions.pending_undo = None;
    }
}
