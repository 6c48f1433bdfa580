//! Application state.
//!
//! Split into `tui` (everything the views read) and `overlay` (the modal
//! layer) so overlay key handlers can borrow the rest of the state
//! immutably while mutating themselves.

use crate::features::feed::FeedState;
use crate::features::search::SearchState;
use crate::features::sessions::SessionsState;
use crate::overlays::Overlay;

#[derive(Debug, Default)]
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Which main view fills the screen next to the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Chat,
    Search,
}

/// Which pane owns plain keystrokes in the chat view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatFocus {
    #[default]
    Sidebar,
    Input,
}

#[derive(Debug, Default)]
pub struct TuiState {
    pub should_quit: bool,
    pub view: View,
    pub focus: ChatFocus,
    pub sessions: SessionsState,
    pub feed: FeedState,
    pub search: SearchState,
    /// Terminal size from the latest Frame event.
    pub frame_width: u16,
    pub frame_height: u16,
}
