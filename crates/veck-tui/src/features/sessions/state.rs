use std::time::{Duration, Instant};

use veck_api::{Message, Session};

/// How long the undo offer stays live after a delete succeeds.
pub const UNDO_WINDOW: Duration = Duration::from_secs(6);

/// Upper bound on messages captured in the pre-delete snapshot.
pub const SNAPSHOT_MESSAGE_LIMIT: usize = 1000;

/// Snapshot held while an undo is offered.
///
/// Single slot: a new delete overwrites any unexpired predecessor, so at
/// most one delete can ever be undone.
#[derive(Debug, Clone)]
pub struct PendingUndo {
    pub session: Session,
    pub messages: Vec<Message>,
    /// The flag the delete was issued with; restore negates it.
    pub remove_vectors: bool,
    /// Explicit deadline, checked on Tick. Past this instant the slot is
    /// cleared and the snapshot can never be restored.
    pub expires_at: Instant,
}

impl PendingUndo {
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    /// Whole seconds left, rounded up: a freshly armed slot reads the full
    /// window and the last partial second reads 1, not 0.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        self.remaining(now).as_millis().div_ceil(1000) as u64
    }
}

#[derive(Debug, Default)]
pub struct SessionsState {
    /// Sessions from the last successful fetch, in backend order.
    pub sessions: Vec<Session>,
    /// Sidebar cursor (index into `sessions`).
    pub cursor: usize,
    /// Id of the session whose feed is open, if any.
    pub open_id: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub pending_undo: Option<PendingUndo>,
}

impl SessionsState {
    /// Session under the sidebar cursor.
    pub fn cursor_session(&self) -> Option<&Session> {
        self.sessions.get(self.cursor)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.sessions.len() {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.sessions.len() {
            self.cursor = self.sessions.len().saturating_sub(1);
        }
    }

    pub(super) fn set_sessions(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
        self.clamp_cursor();
    }

    pub(super) fn set_sessions_retaining(&mut self, keep: impl Fn(&Session) -> bool) {
        self.sessions.retain(|s| keep(s));
        self.clamp_cursor();
    }
}
