//! Fuzzy search over the cached catalog.
//!
//! The index is built from a bulk row window and lives entirely in memory;
//! it is rebuilt only when the backing row set changes. Scoring is
//! tokenized, case-insensitive and edit-distance tolerant, with lower
//! scores meaning better matches.

mod autocomplete;
mod debounce;
mod document;
mod index;
mod terms;

pub use autocomplete::{Autocomplete, AutocompleteState, Suggestion};
pub use debounce::Debouncer;
pub use document::{ParsedField, SearchDocument};
pub use index::{SearchIndex, MIN_QUERY_LEN, SCORE_THRESHOLD};
pub use terms::{TermPool, MAX_TERMS};
