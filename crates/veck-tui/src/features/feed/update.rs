//! Reducer functions for the message feed.

use veck_api::Message;

use super::state::{FeedState, PAGE_SIZE, TOP_FETCH_THRESHOLD};
use crate::effects::UiEffect;

/// Resets the feed for a newly opened session and fetches page zero.
pub fn open_session(feed: &mut FeedState, session_id: String) -> Vec<UiEffect> {
    reset(feed);
    feed.session_id = Some(session_id.clone());
    feed.loading = true;
    vec![UiEffect::LoadMessages {
        session_id,
        generation: feed.generation,
        offset: 0,
        replace: true,
    }]
}

/// Closes the feed (e.g. the open session was deleted).
pub fn close(feed: &mut FeedState) {
    reset(feed);
}

fn reset(feed: &mut FeedState) {
    feed.session_id = None;
    feed.messages.clear();
    feed.offset = 0;
    feed.has_more = true;
    feed.loading = false;
    feed.generation += 1;
    feed.input.clear();
    feed.sending = false;
    feed.error = None;
    feed.scroll_from_bottom = 0;
    feed.total_lines = 0;
}

/// Refreshes the layout cache from the latest frame geometry.
pub fn relayout(feed: &mut FeedState, wrap_width: u16, viewport_height: usize) {
    feed.wrap_width = wrap_width;
    feed.viewport_height = viewport_height;
    feed.total_lines = super::render::line_count(feed, wrap_width);
    feed.scroll_from_bottom = feed.scroll_from_bottom.min(feed.max_scroll());
}

/// A page of messages arrived.
///
/// Responses from a superseded generation (the feed was reset since the
/// request was dispatched) are discarded without touching state.
pub fn handle_messages_loaded(
    feed: &mut FeedState,
    session_id: &str,
    generation: u64,
    offset: usize,
    replace: bool,
    result: Result<Vec<Message>, String>,
) {
    if generation != feed.generation || feed.session_id.as_deref() != Some(session_id) {
        return;
    }
    feed.loading = false;
    match result {
        Ok(page) => {
            if page.len() < PAGE_SIZE {
                feed.has_more = false;
            }
            feed.offset = offset + page.len();
            if replace {
                feed.messages = page;
            } else {
                // Older page: prepend, keeping ascending order intact.
                feed.messages.splice(0..0, page);
            }
        }
        Err(_) => {
            feed.error = Some("Failed to load messages.".to_string());
        }
    }
}

pub fn scroll_up(feed: &mut FeedState) -> Vec<UiEffect> {
    feed.scroll_from_bottom = (feed.scroll_from_bottom + 1).min(feed.max_scroll());
    maybe_fetch_older(feed)
}

pub fn scroll_down(feed: &mut FeedState) -> Vec<UiEffect> {
    feed.scroll_from_bottom = feed.scroll_from_bottom.saturating_sub(1);
    vec![]
}

/// Fetches the next older page when scrolled close to the top.
fn maybe_fetch_older(feed: &mut FeedState) -> Vec<UiEffect> {
    let near_top = feed.lines_above_viewport() <= TOP_FETCH_THRESHOLD;
    if !near_top || !feed.has_more || feed.loading || feed.messages.is_empty() {
        return vec![];
    }
    let Some(session_id) = feed.session_id.clone() else {
        return vec![];
    };
    feed.loading = true;
    vec![UiEffect::LoadMessages {
        session_id,
        generation: feed.generation,
        offset: feed.offset,
        replace: false,
    }]
}

/// Starts the send chain for the current input, if it is non-blank and no
/// send is already in flight. The input is cleared up front; nothing is
/// appended until the backend confirms persistence.
pub fn try_send(feed: &mut FeedState) -> Vec<UiEffect> {
    if feed.sending {
        return vec![];
    }
    let Some(session_id) = feed.session_id.clone() else {
        return vec![];
    };
    let text = feed.input.trim().to_string();
    if text.is_empty() {
        return vec![];
    }
    feed.input.clear();
    feed.sending = true;
    feed.error = None;
    vec![UiEffect::SendMessage {
        session_id,
        generation: feed.generation,
        text,
    }]
}

pub fn handle_user_persisted(
    feed: &mut FeedState,
    session_id: &str,
    generation: u64,
    message: Message,
) {
    if generation != feed.generation || feed.session_id.as_deref() != Some(session_id) {
        return;
    }
    feed.messages.push(message);
    feed.offset += 1;
    feed.scroll_from_bottom = 0;
}

pub fn handle_reply_persisted(
    feed: &mut FeedState,
    session_id: &str,
    generation: u64,
    message: Message,
) {
    if generation != feed.generation || feed.session_id.as_deref() != Some(session_id) {
        return;
    }
    feed.messages.push(message);
    feed.offset += 1;
    feed.sending = false;
    feed.scroll_from_bottom = 0;
}

/// A step of the send chain failed. Messages already appended stay; there
/// is no rollback and exactly one generic error is surfaced.
pub fn handle_send_failed(feed: &mut FeedState, session_id: &str, generation: u64) {
    if generation != feed.generation || feed.session_id.as_deref() != Some(session_id) {
        return;
    }
    feed.sending = false;
    feed.error = Some("Failed to send message.".to_string());
}

#[cfg(test)]
mod tests {
    use veck_api::Sender;

    use super::*;

    fn message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            sender: Sender::User,
            text: format!("message {id}"),
            timestamp: None,
        }
    }

    fn page(start: usize, count: usize) -> Vec<Message> {
        (start..start + count).map(|i| message(&i.to_string())).collect()
    }

    fn open_feed() -> (FeedState, u64) {
        let mut feed = FeedState::default();
        let effects = open_session(&mut feed, "s1".to_string());
        assert_eq!(effects.len(), 1);
        let generation = feed.generation;
        (feed, generation)
    }

    #[test]
    fn forty_five_messages_paginate_20_20_5() {
        let (mut feed, generation) = open_feed();

        handle_messages_loaded(&mut feed, "s1", generation, 0, true, Ok(page(25, 20)));
        assert_eq!(feed.messages.len(), 20);
        assert_eq!(feed.offset, 20);
        assert!(feed.has_more);

        handle_messages_loaded(&mut feed, "s1", generation, 20, false, Ok(page(5, 20)));
        assert_eq!(feed.messages.len(), 40);
        assert_eq!(feed.offset, 40);
        assert!(feed.has_more);

        handle_messages_loaded(&mut feed, "s1", generation, 40, false, Ok(page(0, 5)));
        assert_eq!(feed.messages.len(), 45);
        assert_eq!(feed.offset, 45);
        assert!(!feed.has_more);

        // Concatenation has no duplicates and oldest pages sit first.
        let ids: Vec<&str> = feed.messages.iter().map(|m| m.id.as_str()).collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 45);
        assert_eq!(ids[0], "0");
        assert_eq!(ids[44], "44");
    }

    #[test]
    fn stale_generation_response_is_discarded() {
        let (mut feed, old_generation) = open_feed();
        // Switching sessions resets the feed and bumps the generation.
        open_session(&mut feed, "s2".to_string());

        handle_messages_loaded(&mut feed, "s1", old_generation, 0, true, Ok(page(0, 20)));
        assert!(feed.messages.is_empty());

        // Same for a late response addressed at the right session but with
        // the superseded generation.
        handle_messages_loaded(&mut feed, "s2", old_generation, 0, true, Ok(page(0, 20)));
        assert!(feed.messages.is_empty());
    }

    #[test]
    fn scroll_near_top_fetches_older_page() {
        let (mut feed, generation) = open_feed();
        handle_messages_loaded(&mut feed, "s1", generation, 0, true, Ok(page(0, 20)));

        feed.viewport_height = 10;
        feed.total_lines = 60;
        feed.scroll_from_bottom = feed.max_scroll() - TOP_FETCH_THRESHOLD;

        let effects = scroll_up(&mut feed);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            UiEffect::LoadMessages {
                offset, replace, ..
            } => {
                assert_eq!(*offset, 20);
                assert!(!replace);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
        assert!(feed.loading);

        // Another scroll while loading does not double-fetch.
        let effects = scroll_up(&mut feed);
        assert!(effects.is_empty());
    }

    #[test]
    fn scroll_far_from_top_does_not_fetch() {
        let (mut feed, generation) = open_feed();
        handle_messages_loaded(&mut feed, "s1", generation, 0, true, Ok(page(0, 20)));

        feed.viewport_height = 10;
        feed.total_lines = 60;
        feed.scroll_from_bottom = 0;

        assert!(scroll_up(&mut feed).is_empty());
    }

    #[test]
    fn exhausted_history_never_refetches() {
        let (mut feed, generation) = open_feed();
        handle_messages_loaded(&mut feed, "s1", generation, 0, true, Ok(page(0, 5)));
        assert!(!feed.has_more);

        feed.viewport_height = 2;
        feed.total_lines = 15;
        feed.scroll_from_bottom = feed.max_scroll();
        assert!(scroll_up(&mut feed).is_empty());
    }

    #[test]
    fn blank_input_is_rejected_client_side() {
        let (mut feed, _) = open_feed();
        feed.input = "   ".to_string();
        assert!(try_send(&mut feed).is_empty());
        assert!(!feed.sending);

        feed.input.clear();
        assert!(try_send(&mut feed).is_empty());
    }

    #[test]
    fn send_disables_input_until_resolution() {
        let (mut feed, generation) = open_feed();
        feed.input = "hello".to_string();

        let effects = try_send(&mut feed);
        assert_eq!(effects.len(), 1);
        assert!(feed.sending);
        assert!(feed.input.is_empty());

        // Second send while in flight is ignored.
        feed.input = "again".to_string();
        assert!(try_send(&mut feed).is_empty());

        handle_user_persisted(&mut feed, "s1", generation, message("u1"));
        assert!(feed.sending, "chain still running after user persist");

        handle_reply_persisted(&mut feed, "s1", generation, message("a1"));
        assert!(!feed.sending);
        assert_eq!(feed.messages.len(), 2);
    }

    #[test]
    fn failed_generation_keeps_user_message_and_one_error() {
        let (mut feed, generation) = open_feed();
        feed.input = "hello".to_string();
        try_send(&mut feed);

        handle_user_persisted(&mut feed, "s1", generation, message("u1"));
        handle_send_failed(&mut feed, "s1", generation);

        assert_eq!(feed.messages.len(), 1, "user message stays, no rollback");
        assert_eq!(feed.error.as_deref(), Some("Failed to send message."));
        assert!(!feed.sending);
    }

    #[test]
    fn short_first_page_still_replaces() {
        let (mut feed, generation) = open_feed();
        handle_messages_loaded(&mut feed, "s1", generation, 0, true, Ok(vec![]));
        assert!(feed.messages.is_empty());
        assert!(!feed.has_more);
        assert_eq!(feed.offset, 0);
    }
}
