use veck_api::Message;

/// Messages fetched per page.
pub const PAGE_SIZE: usize = 20;

/// Fetch the next older page when the view is within this many rows of the
/// oldest loaded line.
pub const TOP_FETCH_THRESHOLD: usize = 5;

/// State for the message feed of the open session.
///
/// Scrolling is anchored to the bottom: `scroll_from_bottom == 0` means the
/// latest message is visible, larger values scroll into history. Prepending
/// an older page grows the top without moving the anchor.
#[derive(Debug, Default)]
pub struct FeedState {
    pub session_id: Option<String>,
    /// Loaded messages, ascending by timestamp (backend order).
    pub messages: Vec<Message>,
    /// Offset for the next older page.
    pub offset: usize,
    /// False once a fetch returned a short page.
    pub has_more: bool,
    /// A page fetch is in flight.
    pub loading: bool,
    /// Bumped whenever the feed is reset; responses carrying an older
    /// generation are discarded on arrival.
    pub generation: u64,

    pub input: String,
    /// The send chain is in flight; input is disabled.
    pub sending: bool,
    pub error: Option<String>,

    pub scroll_from_bottom: usize,
    /// Layout cache, refreshed on Frame events.
    pub viewport_height: usize,
    pub wrap_width: u16,
    pub total_lines: usize,
}

impl FeedState {
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    /// Rows between the viewport top and the oldest loaded line.
    pub fn lines_above_viewport(&self) -> usize {
        self.max_scroll().saturating_sub(self.scroll_from_bottom)
    }
}
