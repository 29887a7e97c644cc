//! Autocomplete suggestions and keyboard selection state.

use crate::catalog::HackRow;
use crate::metrics;

use super::{SearchIndex, TermPool, MIN_QUERY_LEN};

/// One suggestion line. `hack_id` is set when the suggestion came from a
/// ranked catalog row rather than the raw term pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub hack_id: Option<u32>,
}

/// Suggestion source combining the fuzzy index with the term pool.
///
/// Single-character input is too short for fuzzy scoring and falls back to
/// substring matches from the term pool; anything longer is ranked by the
/// index.
pub struct Autocomplete {
    index: SearchIndex,
    pool: TermPool,
}

impl Autocomplete {
    pub fn build(rows: Vec<HackRow>) -> Self {
        let index = SearchIndex::build(rows);
        let pool = TermPool::build(index.documents());
        Self { index, pool }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn suggestions(&self, query: &str, max: usize) -> Vec<Suggestion> {
        let trimmed = query.trim();
        let len = trimmed.chars().count();
        if len == 0 {
            return Vec::new();
        }
        if len < MIN_QUERY_LEN {
            return self
                .pool
                .matching_terms(trimmed, max)
                .into_iter()
                .map(|text| Suggestion {
                    text,
                    hack_id: None,
                })
                .collect();
        }

        metrics::SUGGESTION_REQUESTS
            .with_label_values(&["fuzzy"])
            .inc();
        self.index
            .search(trimmed, max)
            .into_iter()
            .map(|row| Suggestion {
                text: row.name,
                hack_id: Some(row.id),
            })
            .collect()
    }
}

/// Keyboard-driven selection over an open suggestion list.
///
/// `highlighted` is `None` when nothing is selected; moving down from the
/// last entry stays on it, moving up from the first deselects.
#[derive(Debug, Default)]
pub struct AutocompleteState {
    suggestions: Vec<Suggestion>,
    highlighted: Option<usize>,
    open: bool,
}

impl AutocompleteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list for new input. Reopens and resets the highlight.
    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.open = !suggestions.is_empty();
        self.suggestions = suggestions;
        self.highlighted = None;
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.highlighted.and_then(|i| self.suggestions.get(i))
    }

    pub fn move_down(&mut self) {
        if !self.open || self.suggestions.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(self.suggestions.len() - 1),
        });
    }

    pub fn move_up(&mut self) {
        self.highlighted = match self.highlighted {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Accept the highlighted suggestion and close the list.
    pub fn commit(&mut self) -> Option<Suggestion> {
        let committed = self.highlighted().cloned();
        if committed.is_some() {
            self.dismiss();
        }
        committed
    }

    /// Close without committing (Escape / click outside).
    pub fn dismiss(&mut self) {
        self.open = false;
        self.suggestions.clear();
        self.highlighted = None;
    }
}
