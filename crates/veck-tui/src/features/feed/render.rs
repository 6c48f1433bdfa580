//! Feed rendering: message layout shared between the renderer and the
//! scroll math (both must agree on line counts).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use veck_api::types::format_timestamp;
use veck_api::{Message, Sender};

use super::state::FeedState;
use crate::common::wrap_text;

/// Builds the display lines for one message: a header, the wrapped body,
/// and a trailing blank separator.
fn message_lines(message: &Message, width: u16) -> Vec<Line<'static>> {
    let (label, color) = match message.sender {
        Sender::User => ("you", Color::Cyan),
        Sender::Assistant => ("assistant", Color::Green),
    };
    let mut header = vec![Span::styled(
        label.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if let Some(ts) = &message.timestamp {
        header.push(Span::styled(
            format!("  {}", format_timestamp(ts)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(header)];
    for text_line in wrap_text(&message.text, width as usize) {
        lines.push(Line::from(text_line));
    }
    lines.push(Line::from(""));
    lines
}

fn feed_lines(feed: &FeedState, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if feed.has_more && !feed.messages.is_empty() {
        let hint = if feed.loading {
            "loading older messages..."
        } else {
            "scroll up for older messages"
        };
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    for message in &feed.messages {
        lines.extend(message_lines(message, width));
    }
    lines
}

/// Number of display lines the feed occupies at the given wrap width.
/// Used by the reducer to keep scroll bounds and the top-fetch trigger in
/// sync with what is actually drawn.
pub fn line_count(feed: &FeedState, width: u16) -> usize {
    feed_lines(feed, width).len()
}

pub fn render(feed: &FeedState, session_title: Option<&str>, frame: &mut Frame, area: Rect) {
    let title = session_title.unwrap_or("Messages");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if feed.session_id.is_none() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "Select a session to start chatting",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(placeholder, inner);
        return;
    }

    let lines = feed_lines(feed, inner.width);
    let viewport = inner.height as usize;

    // Bottom-anchored window: skip everything below the anchor, then take
    // the last viewport's worth of lines.
    let visible_end = lines.len().saturating_sub(feed.scroll_from_bottom);
    let visible_start = visible_end.saturating_sub(viewport);
    let visible: Vec<Line> = lines[visible_start..visible_end].to_vec();
    frame.render_widget(Paragraph::new(visible), inner);
}
