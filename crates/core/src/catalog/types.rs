//! Types for the hack catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filters::{FilterSet, SortSpec};

/// One catalog entry, as returned by the query boundary.
///
/// `authors`, `tags` and `images` hold JSON-encoded text as delivered by
/// the remote source; they are parsed once at search-index build time, not
/// at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HackRow {
    pub id: u32,
    pub name: String,
    /// Local patched ROM path; present only once the hack is in the library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// JSON array of `{name}` objects or plain strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    /// Release date as a UNIX timestamp (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON array of image URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    /// JSON array of tag strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Comma-separated list, e.g. "Kaizo, Tool-Assisted".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hack_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Page window or bulk window for a query.
///
/// A bulk window always starts at offset 0 and is used to materialize the
/// catalog for search indexing, not to render a UI page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    Page { page: u32, page_size: u32 },
    Bulk { limit: u32 },
}

impl Pagination {
    /// The (limit, offset) pair this window translates to.
    pub fn limit_offset(&self) -> (u32, u32) {
        match *self {
            Pagination::Page { page, page_size } => {
                (page_size, page.saturating_sub(1) * page_size)
            }
            Pagination::Bulk { limit } => (limit, 0),
        }
    }
}

/// Patch status facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HackStatus {
    /// In the library (a patched ROM exists on disk).
    Patched,
    /// Catalog-only.
    Unpatched,
}

impl HackStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "patched" => Some(HackStatus::Patched),
            "unpatched" => Some(HackStatus::Unpatched),
            _ => None,
        }
    }
}

/// Facet restrictions in the normalized form the query boundary accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilters {
    pub status: Option<HackStatus>,
    /// Single-select fallback, used when the multi-select list is empty.
    pub difficulty: Option<String>,
    /// OR semantics: a row matches any selected difficulty.
    pub difficulties: Vec<String>,
    /// AND semantics: a row must carry every selected type.
    pub hack_types: Vec<String>,
    pub author: Option<String>,
    pub min_rating: Option<f64>,
}

impl From<&FilterSet> for CatalogFilters {
    /// Normalize a `FilterSet` for the query boundary.
    ///
    /// Multi-select maps collapse to the list of selected keys; an empty
    /// list means "no restriction on this facet", never "exclude all".
    /// A fully-checked map also collapses to no restriction: checkboxes
    /// start out all checked, and under the AND semantics of the type
    /// facet a literal all-selected list would match nothing.
    /// `min_rating` is parsed from its persisted string form and treated
    /// as absent when empty or unparsable.
    fn from(set: &FilterSet) -> Self {
        let difficulties = collapse_selection(&set.difficulties);
        let difficulty = if difficulties.is_empty() && !set.difficulty.is_empty() {
            Some(set.difficulty.clone())
        } else {
            None
        };

        let min_rating = if !set.min_rating.is_empty() {
            set.min_rating.trim().parse::<f64>().ok()
        } else if set.rating_value > 0.0 {
            Some(set.rating_value)
        } else {
            None
        };

        Self {
            status: HackStatus::parse(&set.status),
            difficulty,
            difficulties,
            hack_types: collapse_selection(&set.hack_types),
            author: (!set.author.is_empty()).then(|| set.author.clone()),
            min_rating,
        }
    }
}

/// Selected keys of a multi-select map, or empty when every key is
/// selected (all checked = unrestricted).
fn collapse_selection(map: &std::collections::BTreeMap<String, bool>) -> Vec<String> {
    let selected: Vec<String> = map
        .iter()
        .filter(|(_, on)| **on)
        .map(|(key, _)| key.clone())
        .collect();
    if selected.len() == map.len() {
        return Vec::new();
    }
    selected
}

/// A complete query against the catalog boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub pagination: Pagination,
    pub sort: SortSpec,
    pub filters: CatalogFilters,
}

/// Facet values offered for filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub difficulties: Vec<String>,
    pub hack_types: Vec<String>,
}

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_limit_offset() {
        let p = Pagination::Page {
            page: 1,
            page_size: 50,
        };
        assert_eq!(p.limit_offset(), (50, 0));

        let p = Pagination::Page {
            page: 3,
            page_size: 50,
        };
        assert_eq!(p.limit_offset(), (50, 100));
    }

    #[test]
    fn test_bulk_window_starts_at_zero() {
        let p = Pagination::Bulk { limit: 10_000 };
        assert_eq!(p.limit_offset(), (10_000, 0));
    }

    #[test]
    fn test_normalize_empty_set_is_unrestricted() {
        let filters = CatalogFilters::from(&FilterSet::default());
        assert_eq!(filters, CatalogFilters::default());
    }

    #[test]
    fn test_normalize_multi_select_collapses_to_selected_keys() {
        let mut set = FilterSet::default();
        set.difficulties.insert("Easy".to_string(), true);
        set.difficulties.insert("Hard".to_string(), false);
        set.hack_types.insert("Kaizo".to_string(), true);
        set.hack_types.insert("Standard".to_string(), false);

        let filters = CatalogFilters::from(&set);
        assert_eq!(filters.difficulties, vec!["Easy"]);
        assert_eq!(filters.hack_types, vec!["Kaizo"]);
        assert!(filters.difficulty.is_none());
    }

    #[test]
    fn test_normalize_all_checked_map_is_unrestricted() {
        // checkboxes start out all checked; that state must not turn into
        // an AND over every type
        let mut set = FilterSet::default();
        set.hack_types.insert("Kaizo".to_string(), true);
        set.hack_types.insert("Standard".to_string(), true);
        set.difficulties.insert("Easy".to_string(), true);

        let filters = CatalogFilters::from(&set);
        assert!(filters.hack_types.is_empty());
        assert!(filters.difficulties.is_empty());
    }

    #[test]
    fn test_normalize_single_select_used_as_fallback() {
        let set = FilterSet {
            difficulty: "Hard".to_string(),
            ..Default::default()
        };
        let filters = CatalogFilters::from(&set);
        assert_eq!(filters.difficulty.as_deref(), Some("Hard"));
    }

    #[test]
    fn test_normalize_min_rating_parsing() {
        let set = FilterSet {
            min_rating: "4.5".to_string(),
            ..Default::default()
        };
        assert_eq!(CatalogFilters::from(&set).min_rating, Some(4.5));

        let set = FilterSet {
            min_rating: "not a number".to_string(),
            ..Default::default()
        };
        assert_eq!(CatalogFilters::from(&set).min_rating, None);

        let set = FilterSet {
            rating_value: 4.0,
            ..Default::default()
        };
        assert_eq!(CatalogFilters::from(&set).min_rating, Some(4.0));
    }

    #[test]
    fn test_normalize_status() {
        let set = FilterSet {
            status: "unpatched".to_string(),
            ..Default::default()
        };
        assert_eq!(
            CatalogFilters::from(&set).status,
            Some(HackStatus::Unpatched)
        );

        let set = FilterSet {
            status: "whatever".to_string(),
            ..Default::default()
        };
        assert_eq!(CatalogFilters::from(&set).status, None);
    }

    #[test]
    fn test_hack_row_serialization_skips_absent_fields() {
        let row = HackRow {
            id: 1,
            name: "Test Hack".to_string(),
            file_path: None,
            authors: Some(r#"[{"name":"alice"}]"#.to_string()),
            release_date: None,
            description: None,
            images: None,
            tags: None,
            rating: Some(4.2),
            downloads: None,
            difficulty: None,
            hack_type: None,
            download_url: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("file_path"));
        assert!(json.contains("authors"));

        let parsed: HackRow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, row);
    }
}
