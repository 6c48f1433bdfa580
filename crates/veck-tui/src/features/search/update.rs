//! Reducer functions for the search panel.

use veck_api::SearchResult;

use super::state::{SearchState, THRESHOLD_STEP};
use crate::effects::UiEffect;

/// Fires one search for the current query. Blank or whitespace-only
/// queries issue zero requests.
pub fn submit(search: &mut SearchState) -> Vec<UiEffect> {
    if search.searching {
        return vec![];
    }
    let query = search.query.trim().to_string();
    if query.is_empty() {
        return vec![];
    }
    search.searching = true;
    search.error = None;
    vec![UiEffect::RunSearch {
        query,
        threshold: search.threshold,
    }]
}

/// Nudges the threshold by whole steps, clamped to [0.0, 1.0].
pub fn adjust_threshold(search: &mut SearchState, steps: i32) {
    let value = search.threshold + f64::from(steps) * THRESHOLD_STEP;
    // Round to the step grid so repeated nudges don't accumulate float dust.
    let value = (value / THRESHOLD_STEP).round() * THRESHOLD_STEP;
    search.threshold = value.clamp(0.0, 1.0);
}

pub fn handle_finished(search: &mut SearchState, result: Result<Vec<SearchResult>, String>) {
    search.searching = false;
    match result {
        Ok(results) => {
            search.results = results;
            search.error = None;
        }
        Err(_) => {
            search.error = Some("Search failed.".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_issues_zero_requests() {
        let mut search = SearchState::default();
        assert!(submit(&mut search).is_empty());

        search.query = "   \t ".to_string();
        assert!(submit(&mut search).is_empty());
        assert!(!search.searching);
    }

    #[test]
    fn submit_carries_current_threshold() {
        let mut search = SearchState::default();
        search.query = "deploy keys".to_string();
        search.threshold = 0.75;

        let effects = submit(&mut search);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            UiEffect::RunSearch { query, threshold } => {
                assert_eq!(query, "deploy keys");
                assert!((threshold - 0.75).abs() < f64::EPSILON);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
        assert!(search.searching);

        // No second request while one is in flight.
        assert!(submit(&mut search).is_empty());
    }

    #[test]
    fn threshold_clamps_to_unit_interval() {
        let mut search = SearchState::default();
        adjust_threshold(&mut search, -100);
        assert!((search.threshold - 0.0).abs() < f64::EPSILON);

        adjust_threshold(&mut search, 200);
        assert!((search.threshold - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_moves_in_hundredth_steps() {
        let mut search = SearchState::default();
        adjust_threshold(&mut search, 1);
        assert!((search.threshold - 0.51).abs() < 1e-9);
        adjust_threshold(&mut search, -2);
        assert!((search.threshold - 0.49).abs() < 1e-9);
    }

    #[test]
    fn results_are_replaced_wholesale() {
        let mut search = SearchState::default();
        search.results = vec![SearchResult {
            prompt: "old".to_string(),
            response: "old".to_string(),
            score: 0.9,
        }];
        handle_finished(&mut search, Ok(vec![]));
        assert!(search.results.is_empty());
        assert!(search.error.is_none());
    }

    #[test]
    fn failure_surfaces_one_error_and_keeps_results() {
        let mut search = SearchState::default();
        search.results = vec![SearchResult {
            prompt: "p".to_string(),
            response: "r".to_string(),
            score: 0.8,
        }];
        handle_finished(&mut search, Err("boom".to_string()));
        assert_eq!(search.error.as_deref(), Some("Search failed."));
        assert_eq!(search.results.len(), 1);
    }
}
