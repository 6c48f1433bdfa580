//! Sidebar rendering: session rows plus the undo notice footer.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use veck_api::types::format_timestamp;

use super::state::SessionsState;
use crate::common::truncate_end_with_ellipsis;
use crate::state::ChatFocus;

pub fn render(
    sessions: &SessionsState,
    focus: ChatFocus,
    now: Instant,
    frame: &mut Frame,
    area: Rect,
) {
    let footer_height = u16::from(sessions.pending_undo.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
        .split(area);

    render_list(sessions, focus, frame, chunks[0]);
    if footer_height > 0 {
        render_undo_notice(sessions, now, frame, chunks[1]);
    }
}

fn render_list(sessions: &SessionsState, focus: ChatFocus, frame: &mut Frame, area: Rect) {
    let border_color = if focus == ChatFocus::Sidebar {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Sessions ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if sessions.loading && sessions.sessions.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "loading...",
                Style::default().fg(Color::DarkGray),
            ))),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, session) in sessions.sessions.iter().enumerate() {
        let selected = i == sessions.cursor;
        let open = sessions.open_id.as_deref() == Some(session.id.as_str());
        let marker = if open { "● " } else { "  " };
        let title = truncate_end_with_ellipsis(
            &session.display_title(),
            width.saturating_sub(marker.len()),
        );
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("{marker}{title}"), style)));
        if let Some(ts) = &session.created_at {
            lines.push(Line::from(Span::styled(
                format!("  {}", format_timestamp(ts)),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    if let Some(error) = &sessions.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.truncate(inner.height as usize);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_undo_notice(sessions: &SessionsState, now: Instant, frame: &mut Frame, area: Rect) {
    let Some(pending) = &sessions.pending_undo else {
        return;
    };
    let secs = pending.remaining_secs(now);
    let notice = format!(" deleted, press u to undo ({secs}s)");
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            notice,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))),
        area,
    );
}
