//! New-session overlay: an optional title input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

use super::{OverlayUpdate, render_utils};
use crate::effects::UiEffect;

#[derive(Debug, Clone, Default)]
pub struct NewSessionState {
    pub input: String,
}

impl NewSessionState {
    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Enter => {
                // Empty input creates an untitled session.
                let title = self.input.trim();
                let title = (!title.is_empty()).then(|| title.to_string());
                OverlayUpdate::close()
                    .with_ui_effects(vec![UiEffect::CreateSession { title }])
            }
            KeyCode::Backspace => {
                self.input.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        use render_utils::{InputHint, InputLine, OverlayConfig, render_input_line, render_overlay};

        let hints = [
            InputHint::new("Enter", "create"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "New Session",
                border_color: Color::Cyan,
                width: 50,
                height: 6,
                hints: &hints,
            },
        );

        let input_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
        render_input_line(
            frame,
            input_area,
            &InputLine {
                value: &self.input,
                placeholder: Some("Untitled session"),
                prompt: "> ",
            },
        );
    }
}
