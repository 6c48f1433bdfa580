//! Top-level rendering: screen layout and dispatch to feature renderers.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::features::{feed, search, sessions};
use crate::state::{AppState, ChatFocus, View};
use crate::update::SIDEBAR_WIDTH;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let now = Instant::now();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);

    sessions::render::render(
        &app.tui.sessions,
        app.tui.focus,
        now,
        frame,
        columns[0],
    );

    match app.tui.view {
        View::Search => search::render::render(&app.tui.search, frame, columns[1]),
        View::Chat => render_chat(app, frame, columns[1]),
    }

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area);
    }
}

fn render_chat(app: &AppState, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let open_title = app
        .tui
        .sessions
        .open_id
        .as_deref()
        .and_then(|id| {
            app.tui
                .sessions
                .sessions
                .iter()
                .find(|s| s.id == id)
                .map(veck_api::Session::display_title)
        });
    feed::render::render(&app.tui.feed, open_title.as_deref(), frame, rows[0]);
    render_input(app, frame, rows[1]);
    render_status(app, frame, rows[2]);
}

fn render_input(app: &AppState, frame: &mut Frame, area: Rect) {
    let focused = app.tui.focus == ChatFocus::Input;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let feed = &app.tui.feed;
    let mut spans = vec![Span::styled("> ", Style::default().fg(Color::DarkGray))];
    if feed.sending {
        spans.push(Span::styled(
            "waiting for reply...",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let visible = crate::common::truncate_start_with_ellipsis(
            &feed.input,
            inner.width.saturating_sub(3) as usize,
        );
        spans.push(Span::raw(visible));
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_status(app: &AppState, frame: &mut Frame, area: Rect) {
    let (text, color) = if let Some(error) = &app.tui.feed.error {
        (error.clone(), Color::Red)
    } else if app.tui.feed.loading {
        ("loading...".to_string(), Color::DarkGray)
    } else {
        (
            "Tab focus • Ctrl+F search • n new • d delete • q quit".to_string(),
            Color::DarkGray,
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {text}"),
            Style::default().fg(color),
        ))),
        area,
    );
}
