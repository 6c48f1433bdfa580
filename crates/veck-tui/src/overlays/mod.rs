//! Modal overlays. An active overlay takes over keyboard input until it
//! closes; each overlay owns its state, key handler, and render function.

pub mod delete_confirm;
pub mod new_session;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use delete_confirm::DeleteConfirmState;
pub use new_session::NewSessionState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            effects: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    DeleteConfirm(DeleteConfirmState),
    NewSession(NewSessionState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::DeleteConfirm(o) => o.render(frame, area),
            Overlay::NewSession(o) => o.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::DeleteConfirm(o) => o.handle_key(key),
            Overlay::NewSession(o) => o.handle_key(key),
        }
    }
}
