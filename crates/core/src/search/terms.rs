//! Bounded suggestion term pool.

use crate::metrics;

use super::SearchDocument;

/// Upper bound on pooled terms; rows beyond the cap contribute nothing.
pub const MAX_TERMS: usize = 1000;

/// Distinct names, author names and tags collected at index build time.
///
/// Dedupe is case-insensitive and keeps the first-seen casing, so the pool
/// preserves the catalog's canonical spelling.
pub struct TermPool {
    terms: Vec<String>,
}

impl TermPool {
    pub fn build(documents: &[SearchDocument]) -> Self {
        let mut terms: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();

        let mut push = |term: &str, terms: &mut Vec<String>, seen: &mut Vec<String>| {
            if terms.len() >= MAX_TERMS {
                return;
            }
            let term = term.trim();
            if term.is_empty() {
                return;
            }
            let folded = term.to_lowercase();
            if seen.contains(&folded) {
                return;
            }
            seen.push(folded);
            terms.push(term.to_string());
        };

        for doc in documents {
            push(&doc.name, &mut terms, &mut seen);
            for author in doc.authors.names() {
                push(author, &mut terms, &mut seen);
            }
            for tag in doc.tags.names() {
                push(tag, &mut terms, &mut seen);
            }
        }

        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms containing `query`, case-insensitively, at most `max`.
    ///
    /// This is the single-character path; longer queries go through the
    /// fuzzy index instead.
    pub fn matching_terms(&self, query: &str, max: usize) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        metrics::SUGGESTION_REQUESTS
            .with_label_values(&["substring"])
            .inc();
        self.terms
            .iter()
            .filter(|term| term.to_lowercase().contains(&query))
            .take(max)
            .cloned()
            .collect()
    }
}
