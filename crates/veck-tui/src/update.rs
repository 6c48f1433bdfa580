//! The reducer: `update(state, event) -> effects`.
//!
//! Pure with respect to I/O: all side effects are returned as `UiEffect`s
//! for the runtime to execute. Time enters through `Instant::now()` at the
//! two points that need it (Tick expiry and delete completion); the
//! time-sensitive logic itself lives in the feature modules and takes `now`
//! as a parameter so tests control the clock.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{feed, search, sessions};
use crate::overlays::{Overlay, OverlayTransition};
use crate::state::{AppState, ChatFocus, View};

/// Sidebar width in columns.
pub const SIDEBAR_WIDTH: u16 = 32;

/// Rows taken by the input box (bordered) plus the status line.
const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Frame { width, height } => {
            app.tui.frame_width = width;
            app.tui.frame_height = height;
            let wrap_width = width
                .saturating_sub(SIDEBAR_WIDTH)
                .saturating_sub(2);
            let viewport = height
                .saturating_sub(INPUT_HEIGHT + STATUS_HEIGHT)
                .saturating_sub(2) as usize;
            feed::relayout(&mut app.tui.feed, wrap_width, viewport);
            vec![]
        }
        UiEvent::Tick => {
            sessions::expire_pending_undo(&mut app.tui, Instant::now());
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],

        UiEvent::SessionsLoaded(result) => {
            sessions::handle_loaded(&mut app.tui, result);
            vec![]
        }
        UiEvent::SessionCreated(result) => sessions::handle_created(&mut app.tui, result),
        UiEvent::SessionDeleted {
            session,
            messages,
            remove_vectors,
            result,
        } => sessions::handle_deleted(
            &mut app.tui,
            session,
            messages,
            remove_vectors,
            result,
            Instant::now(),
        ),
        UiEvent::SessionRestored { result, .. } => sessions::handle_restored(&mut app.tui, result),

        UiEvent::MessagesLoaded {
            session_id,
            generation,
            offset,
            replace,
            result,
        } => {
            feed::handle_messages_loaded(
                &mut app.tui.feed,
                &session_id,
                generation,
                offset,
                replace,
                result,
            );
            vec![]
        }
        UiEvent::UserMessagePersisted {
            session_id,
            generation,
            message,
        } => {
            feed::handle_user_persisted(&mut app.tui.feed, &session_id, generation, message);
            vec![]
        }
        UiEvent::ReplyPersisted {
            session_id,
            generation,
            message,
        } => {
            feed::handle_reply_persisted(&mut app.tui.feed, &session_id, generation, message);
            vec![]
        }
        UiEvent::SendFailed {
            session_id,
            generation,
            ..
        } => {
            feed::handle_send_failed(&mut app.tui.feed, &session_id, generation);
            vec![]
        }

        UiEvent::SearchFinished(result) => {
            search::handle_finished(&mut app.tui.search, result);
            vec![]
        }
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // An active overlay owns the keyboard.
    if let Some(overlay) = app.overlay.as_mut() {
        let result = overlay.handle_key(key);
        if matches!(result.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return result.effects;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return vec![UiEffect::Quit];
    }
    if ctrl && key.code == KeyCode::Char('f') {
        app.tui.view = match app.tui.view {
            View::Chat => View::Search,
            View::Search => View::Chat,
        };
        return vec![];
    }

    match app.tui.view {
        View::Search => handle_search_key(app, key),
        View::Chat => handle_chat_key(app, key, ctrl),
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let search = &mut app.tui.search;
    match key.code {
        KeyCode::Esc => {
            app.tui.view = View::Chat;
            vec![]
        }
        KeyCode::Enter => search::submit(search),
        KeyCode::Left => {
            search::adjust_threshold(search, -1);
            vec![]
        }
        KeyCode::Right => {
            search::adjust_threshold(search, 1);
            vec![]
        }
        KeyCode::Backspace => {
            search.query.pop();
            vec![]
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            search.query.push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_chat_key(app: &mut AppState, key: KeyEvent, ctrl: bool) -> Vec<UiEffect> {
    if key.code == KeyCode::Tab {
        app.tui.focus = match app.tui.focus {
            ChatFocus::Sidebar => ChatFocus::Input,
            ChatFocus::Input => ChatFocus::Sidebar,
        };
        return vec![];
    }

    match app.tui.focus {
        ChatFocus::Sidebar => handle_sidebar_key(app, key),
        ChatFocus::Input => handle_input_key(app, key, ctrl),
    }
}

fn handle_sidebar_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.tui.sessions.cursor_up();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.tui.sessions.cursor_down();
            vec![]
        }
        KeyCode::Enter => {
            let effects = sessions::open_cursor_session(&mut app.tui);
            if app.tui.sessions.open_id.is_some() {
                app.tui.focus = ChatFocus::Input;
            }
            effects
        }
        KeyCode::Char('n') => {
            app.overlay = Some(Overlay::NewSession(
                crate::overlays::NewSessionState::default(),
            ));
            vec![]
        }
        KeyCode::Char('d') => {
            if let Some(session) = app.tui.sessions.cursor_session() {
                app.overlay = Some(Overlay::DeleteConfirm(
                    crate::overlays::DeleteConfirmState::open(session.clone()),
                ));
            }
            vec![]
        }
        KeyCode::Char('u') => sessions::request_undo(&mut app.tui, Instant::now()),
        KeyCode::Char('r') => sessions::refresh(&mut app.tui),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::PageUp => feed::scroll_up(&mut app.tui.feed),
        KeyCode::PageDown => feed::scroll_down(&mut app.tui.feed),
        _ => vec![],
    }
}

fn handle_input_key(app: &mut AppState, key: KeyEvent, ctrl: bool) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.tui.focus = ChatFocus::Sidebar;
            vec![]
        }
        KeyCode::Enter => feed::try_send(&mut app.tui.feed),
        KeyCode::Backspace => {
            app.tui.feed.input.pop();
            vec![]
        }
        KeyCode::Up | KeyCode::PageUp => feed::scroll_up(&mut app.tui.feed),
        KeyCode::Down | KeyCode::PageDown => feed::scroll_down(&mut app.tui.feed),
        KeyCode::Char(c) if !ctrl && !app.tui.feed.sending => {
            app.tui.feed.input.push(c);
            vec![]
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use veck_api::Session;

    use super::*;

    fn key_event(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl_key(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            title: None,
            created_at: None,
        }
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = AppState::new();
        let effects = update(&mut app, ctrl_key('c'));
        assert!(matches!(effects[0], UiEffect::Quit));
    }

    #[test]
    fn ctrl_f_toggles_search_view() {
        let mut app = AppState::new();
        update(&mut app, ctrl_key('f'));
        assert_eq!(app.tui.view, View::Search);
        update(&mut app, ctrl_key('f'));
        assert_eq!(app.tui.view, View::Chat);
    }

    #[test]
    fn delete_key_opens_confirm_overlay() {
        let mut app = AppState::new();
        update(
            &mut app,
            UiEvent::SessionsLoaded(Ok(vec![session("a"), session("b")])),
        );

        update(&mut app, key_event(KeyCode::Char('d')));
        assert!(matches!(app.overlay, Some(Overlay::DeleteConfirm(_))));

        // Confirming closes the overlay and fires the delete effect.
        let effects = update(&mut app, key_event(KeyCode::Enter));
        assert!(app.overlay.is_none());
        assert!(matches!(effects[0], UiEffect::DeleteSession { .. }));
    }

    #[test]
    fn undo_key_fires_restore_within_window() {
        let mut app = AppState::new();
        update(
            &mut app,
            UiEvent::SessionDeleted {
                session: session("a"),
                messages: vec![],
                remove_vectors: true,
                result: Ok(()),
            },
        );
        assert!(app.tui.sessions.pending_undo.is_some());

        let effects = update(&mut app, key_event(KeyCode::Char('u')));
        assert!(matches!(effects[0], UiEffect::RestoreSession { .. }));
        assert!(app.tui.sessions.pending_undo.is_none());
    }

    #[test]
    fn selecting_session_loads_page_zero_and_focuses_input() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::SessionsLoaded(Ok(vec![session("a")])));

        let effects = update(&mut app, key_event(KeyCode::Enter));
        assert_eq!(app.tui.sessions.open_id.as_deref(), Some("a"));
        assert_eq!(app.tui.focus, ChatFocus::Input);
        match &effects[0] {
            UiEffect::LoadMessages {
                session_id,
                offset,
                replace,
                ..
            } => {
                assert_eq!(session_id, "a");
                assert_eq!(*offset, 0);
                assert!(replace);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn typing_while_sending_is_ignored() {
        let mut app = AppState::new();
        app.tui.focus = ChatFocus::Input;
        app.tui.feed.sending = true;
        update(&mut app, key_event(KeyCode::Char('x')));
        assert!(app.tui.feed.input.is_empty());
    }

    #[test]
    fn search_enter_with_blank_query_is_a_no_op() {
        let mut app = AppState::new();
        app.tui.view = View::Search;
        let effects = update(&mut app, key_event(KeyCode::Enter));
        assert!(effects.is_empty());
    }

    #[test]
    fn frame_event_updates_feed_layout() {
        let mut app = AppState::new();
        update(
            &mut app,
            UiEvent::Frame {
                width: 100,
                height: 30,
            },
        );
        assert_eq!(app.tui.feed.wrap_width, 100 - SIDEBAR_WIDTH - 2);
        assert_eq!(app.tui.feed.viewport_height, (30 - 4 - 2) as usize);
    }
}
