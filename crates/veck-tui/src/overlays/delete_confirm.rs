//! Delete confirmation overlay.
//!
//! Carries the one choice of the delete flow: whether to also remove the
//! session's vectors from the store (on by default).

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use veck_api::Session;

use super::{OverlayUpdate, render_utils};
use crate::common::truncate_end_with_ellipsis;
use crate::effects::UiEffect;

#[derive(Debug, Clone)]
pub struct DeleteConfirmState {
    pub session: Session,
    pub remove_vectors: bool,
}

impl DeleteConfirmState {
    pub fn open(session: Session) -> Self {
        Self {
            session,
            remove_vectors: true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => OverlayUpdate::close(),
            KeyCode::Char('v') | KeyCode::Char(' ') | KeyCode::Tab => {
                self.remove_vectors = !self.remove_vectors;
                OverlayUpdate::stay()
            }
            KeyCode::Enter | KeyCode::Char('y') => {
                OverlayUpdate::close().with_ui_effects(vec![UiEffect::DeleteSession {
                    session: self.session.clone(),
                    remove_vectors: self.remove_vectors,
                }])
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        use render_utils::{InputHint, OverlayConfig, render_overlay};

        let hints = [
            InputHint::new("Enter", "delete"),
            InputHint::new("v", "toggle vectors"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Delete Session",
                border_color: Color::Red,
                width: 50,
                height: 7,
                hints: &hints,
            },
        );

        let title = truncate_end_with_ellipsis(
            &self.session.display_title(),
            layout.body.width.saturating_sub(8) as usize,
        );
        let question = Paragraph::new(Line::from(format!("Delete \"{title}\"?")));
        frame.render_widget(
            question,
            Rect::new(layout.body.x, layout.body.y, layout.body.width, 1),
        );

        let checkbox = if self.remove_vectors { "[x]" } else { "[ ]" };
        let vectors_line = Line::from(vec![
            Span::styled(checkbox, Style::default().fg(Color::Red)),
            Span::raw(" also remove vectors from the store"),
        ]);
        frame.render_widget(
            Paragraph::new(vectors_line),
            Rect::new(layout.body.x, layout.body.y + 2, layout.body.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> DeleteConfirmState {
        DeleteConfirmState::open(Session {
            id: "s1".to_string(),
            title: Some("Groceries".to_string()),
            created_at: None,
        })
    }

    #[test]
    fn remove_vectors_defaults_on_and_toggles() {
        let mut overlay = state();
        assert!(overlay.remove_vectors);
        overlay.handle_key(key(KeyCode::Char('v')));
        assert!(!overlay.remove_vectors);
        overlay.handle_key(key(KeyCode::Char('v')));
        assert!(overlay.remove_vectors);
    }

    #[test]
    fn confirm_emits_delete_with_current_flag() {
        let mut overlay = state();
        overlay.handle_key(key(KeyCode::Char('v')));
        let update = overlay.handle_key(key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Close));
        match &update.effects[0] {
            UiEffect::DeleteSession {
                session,
                remove_vectors,
            } => {
                assert_eq!(session.id, "s1");
                assert!(!remove_vectors);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn cancel_closes_without_effects() {
        let mut overlay = state();
        let update = overlay.handle_key(key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.effects.is_empty());
    }
}
