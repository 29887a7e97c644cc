//! The persisted facet selection set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Active facet selections for a view.
///
/// Every field carries `#[serde(default)]` so a partial persisted object
/// merges over defaults on reload - missing keys fall back to "no
/// restriction", never to an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Single-select difficulty (library view). Empty = unrestricted.
    #[serde(default)]
    pub difficulty: String,
    /// Single-select hack type (library view). Empty = unrestricted.
    #[serde(default)]
    pub hack_type: String,
    /// Author substring filter. Empty = unrestricted.
    #[serde(default)]
    pub author: String,
    /// Minimum rating in its persisted string form ("" = unrestricted).
    #[serde(default)]
    pub min_rating: String,
    /// Patch status: "", "patched" or "unpatched".
    #[serde(default)]
    pub status: String,
    /// Multi-select difficulties (discovery view): value -> selected.
    #[serde(default)]
    pub difficulties: BTreeMap<String, bool>,
    /// Multi-select hack types (discovery view): value -> selected.
    #[serde(default)]
    pub hack_types: BTreeMap<String, bool>,
    /// Discovery rating slider. 0.0 = unrestricted.
    #[serde(default)]
    pub rating_value: f64,
}

impl FilterSet {
    /// True when no facet restricts the result set.
    pub fn is_unrestricted(&self) -> bool {
        self.difficulty.is_empty()
            && self.hack_type.is_empty()
            && self.author.is_empty()
            && self.min_rating.is_empty()
            && self.status.is_empty()
            && self.rating_value == 0.0
            && !self.difficulties.values().any(|v| *v)
            && !self.hack_types.values().any(|v| *v)
    }

    /// Keys of the multi-select difficulties currently selected, sorted.
    pub fn selected_difficulties(&self) -> Vec<String> {
        selected_keys(&self.difficulties)
    }

    /// Keys of the multi-select hack types currently selected, sorted.
    pub fn selected_hack_types(&self) -> Vec<String> {
        selected_keys(&self.hack_types)
    }
}

fn selected_keys(map: &BTreeMap<String, bool>) -> Vec<String> {
    map.iter()
        .filter(|(_, selected)| **selected)
        .map(|(key, _)| key.clone())
        .collect()
}
