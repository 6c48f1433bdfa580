//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox pattern
//!
//! Async handlers send `UiEvent`s to `inbox_tx`; the runtime drains
//! `inbox_rx` each frame. There are no per-operation receivers.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use veck_api::ApiClient;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while something is in flight or the user is interacting.
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Tick cadence when idle. The undo countdown only needs second-level
/// resolution, so a slow tick is fine.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: Arc<ApiClient>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: std::time::Instant,
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    pub fn new(client: ApiClient) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("failed to set up terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(),
            client: Arc::new(client),
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        // Eager initial fetch: the sidebar fills without a keypress.
        let effects = crate::features::sessions::refresh(&mut self.state.tui);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Frame event first so layout state is fresh for everything else.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                    dirty = true;
                }
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while anything is in flight or the user is typing;
        // slow polling otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let busy = self.state.tui.sessions.loading
            || self.state.tui.feed.loading
            || self.state.tui.feed.sending
            || self.state.tui.search.searching
            || recent_terminal_activity;
        let tick_interval = if busy { FRAME_DURATION } else { IDLE_POLL_DURATION };

        // Drain inbox: all async results arrive here.
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block on terminal input only when there is nothing else to do.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler, routing its result event into the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        let client = Arc::clone(&self.client);
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::LoadSessions => {
                self.spawn_effect(move || handlers::load_sessions(client));
            }
            UiEffect::CreateSession { title } => {
                self.spawn_effect(move || handlers::create_session(client, title));
            }
            UiEffect::DeleteSession {
                session,
                remove_vectors,
            } => {
                self.spawn_effect(move || handlers::delete_session(client, session, remove_vectors));
            }
            UiEffect::RestoreSession { request } => {
                self.spawn_effect(move || handlers::restore_session(client, request));
            }
            UiEffect::LoadMessages {
                session_id,
                generation,
                offset,
                replace,
            } => {
                self.spawn_effect(move || {
                    handlers::load_messages(client, session_id, generation, offset, replace)
                });
            }
            UiEffect::SendMessage {
                session_id,
                generation,
                text,
            } => {
                // The send chain reports intermediate progress, so the
                // handler gets its own sender alongside the final event.
                let tx = self.inbox_tx.clone();
                self.spawn_effect(move || {
                    handlers::send_message(client, tx, session_id, generation, text)
                });
            }
            UiEffect::RunSearch { query, threshold } => {
                self.spawn_effect(move || handlers::run_search(client, query, threshold));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
