//! Search view rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::SearchState;
use crate::common::wrap_text;

pub fn render(search: &SearchState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_query_bar(search, frame, chunks[0]);
    render_results(search, frame, chunks[1]);
}

fn render_query_bar(search: &SearchState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Search (threshold {:.2}) ", search.threshold));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::raw(search.query.clone()),
    ];
    if search.searching {
        spans.push(Span::styled(
            "  searching...",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_results(search: &SearchState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results ({}) ", search.results.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &search.error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ))),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for result in &search.results {
        lines.push(Line::from(Span::styled(
            format!("score {:.2}", result.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for l in wrap_text(&result.prompt, width.saturating_sub(2)) {
            lines.push(Line::from(vec![
                Span::styled("Q ", Style::default().fg(Color::Cyan)),
                Span::raw(l),
            ]));
        }
        for l in wrap_text(&result.response, width.saturating_sub(2)) {
            lines.push(Line::from(vec![
                Span::styled("A ", Style::default().fg(Color::Green)),
                Span::raw(l),
            ]));
        }
        lines.push(Line::from(""));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Type a query and press Enter",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.truncate(inner.height as usize);
    frame.render_widget(Paragraph::new(lines), inner);
}
