use veck_api::SearchResult;

pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const THRESHOLD_STEP: f64 = 0.01;

/// State for the search view. Stateless between queries: each submit
/// replaces the result list wholesale.
#[derive(Debug)]
pub struct SearchState {
    pub query: String,
    /// Minimum similarity score, in [0.0, 1.0].
    pub threshold: f64,
    pub results: Vec<SearchResult>,
    pub searching: bool,
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            threshold: DEFAULT_THRESHOLD,
            results: Vec::new(),
            searching: false,
            error: None,
        }
    }
}
