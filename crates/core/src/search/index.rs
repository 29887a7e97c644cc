//! In-memory fuzzy index over catalog rows.

use crate::catalog::HackRow;
use crate::metrics;

use super::SearchDocument;

/// Queries shorter than this (in characters, trimmed) return no results.
pub const MIN_QUERY_LEN: usize = 2;

/// Documents scoring above this are dropped. Lower scores are better.
pub const SCORE_THRESHOLD: f64 = 0.4;

/// Base cost added to every matched field before weighting, so a match on
/// a heavier field always outranks the same match on a lighter one.
const FIELD_BASE: f64 = 0.1;

const WEIGHT_NAME: f64 = 0.5;
const WEIGHT_AUTHORS: f64 = 0.3;
const WEIGHT_TAGS: f64 = 0.15;
const WEIGHT_DESCRIPTION: f64 = 0.05;

/// Fuzzy search index, rebuilt whenever the backing row set changes.
pub struct SearchIndex {
    documents: Vec<SearchDocument>,
}

impl SearchIndex {
    pub fn build(rows: Vec<HackRow>) -> Self {
        let documents: Vec<SearchDocument> =
            rows.into_iter().map(SearchDocument::from_row).collect();
        metrics::INDEX_BUILDS.inc();
        metrics::INDEX_DOCUMENTS.observe(documents.len() as f64);
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Rank rows against `query`, best matches first, at most `max` rows.
    pub fn search(&self, query: &str, max: usize) -> Vec<HackRow> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &SearchDocument)> = self
            .documents
            .iter()
            .filter_map(|doc| score_document(&tokens, doc).map(|score| (score, doc)))
            .collect();

        scored.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.name.cmp(&b.1.name))
        });

        scored
            .into_iter()
            .take(max)
            .map(|(_, doc)| doc.row.clone())
            .collect()
    }
}

/// Lowercased alphanumeric words.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Score one query token against one field word. `None` means no match.
fn token_score(token: &str, word: &str) -> Option<f64> {
    if token == word {
        return Some(0.0);
    }
    if word.contains(token) {
        let extra = (word.chars().count() - token.chars().count()) as f64;
        return Some((0.05 + extra * 0.01).min(0.3));
    }
    let distance = levenshtein(token, word) as f64;
    let max_len = token.chars().count().max(word.chars().count()) as f64;
    let normalized = distance / max_len;
    (normalized <= SCORE_THRESHOLD).then_some(normalized)
}

/// Average per-token score for one field, `None` when no token matches.
///
/// Tokens with no match in this field still count against the average at
/// full cost, so multi-token queries prefer fields covering every token.
fn field_score(tokens: &[String], text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    let words = tokenize(text);
    if words.is_empty() {
        return None;
    }

    let mut matched_any = false;
    let mut total = 0.0;
    for token in tokens {
        let best = words
            .iter()
            .filter_map(|word| token_score(token, word))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        match best {
            Some(score) => {
                matched_any = true;
                total += score;
            }
            None => total += 1.0,
        }
    }
    matched_any.then_some(total / tokens.len() as f64)
}

/// Best weighted field score for a document, `None` when nothing matches.
fn score_document(tokens: &[String], doc: &SearchDocument) -> Option<f64> {
    let fields = [
        (doc.name.as_str(), WEIGHT_NAME),
        (doc.authors_text.as_str(), WEIGHT_AUTHORS),
        (doc.tags_text.as_str(), WEIGHT_TAGS),
        (doc.description.as_str(), WEIGHT_DESCRIPTION),
    ];

    let mut best: Option<f64> = None;
    for (text, weight) in fields {
        if let Some(score) = field_score(tokens, text) {
            let weighted = (1.0 - weight) * (FIELD_BASE + score);
            if best.is_none_or(|b| weighted < b) {
                best = Some(weighted);
            }
        }
    }
    best.filter(|score| *score <= SCORE_THRESHOLD)
}

/// Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(a_len + 1) {
        row[0] = i;
    }
    for (j, val) in matrix[0].iter_mut().enumerate().take(b_len + 1) {
        *val = j;
    }

    for (i, a_char) in a_chars.iter().enumerate() {
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if *a_char == *b_char { 0 } else { 1 };
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[a_len][b_len]
}
