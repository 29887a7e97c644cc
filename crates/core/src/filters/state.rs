//! Persistent filter state for a view.

use std::sync::Arc;

use tracing::warn;

use crate::catalog::FilterOptions;
use crate::storage::KeyValueStore;

use super::FilterSet;

/// Holds the active `FilterSet` for one view, persisting every mutation to
/// its durable slot.
///
/// The previously saved set is loaded verbatim at construction; saves are
/// suppressed until that load has completed so in-memory defaults can never
/// clobber stored state. `clear()` resets every facet and deletes the slot
/// entirely.
pub struct FilterState {
    store: Arc<dyn KeyValueStore>,
    slot: Option<String>,
    set: FilterSet,
    available: FilterOptions,
    loaded: bool,
}

impl FilterState {
    pub fn new(store: Arc<dyn KeyValueStore>, slot: Option<&str>) -> Self {
        let mut state = Self {
            store,
            slot: slot.map(str::to_string),
            set: FilterSet::default(),
            available: FilterOptions::default(),
            loaded: false,
        };
        state.load();
        state.loaded = true;
        state
    }

    fn load(&mut self) {
        let Some(slot) = &self.slot else {
            return;
        };
        match self.store.get(slot) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(set) => self.set = set,
                Err(e) => warn!("discarding unreadable filter slot {slot}: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("failed to read filter slot {slot}: {e}"),
        }
    }

    fn persist(&self) {
        if !self.loaded {
            return;
        }
        let Some(slot) = &self.slot else {
            return;
        };
        match serde_json::to_string(&self.set) {
            Ok(json) => {
                if let Err(e) = self.store.set(slot, &json) {
                    warn!("failed to persist filter slot {slot}: {e}");
                }
            }
            Err(e) => warn!("failed to encode filter set: {e}"),
        }
    }

    pub fn set(&self) -> &FilterSet {
        &self.set
    }

    /// Facet values offered by the catalog (difficulties, hack types).
    pub fn available(&self) -> &FilterOptions {
        &self.available
    }

    /// Record the facet options the catalog offers.
    ///
    /// Multi-select keys the stored set does not yet know start out
    /// selected, so a fresh session shows the full catalog; persisted
    /// selections are left untouched.
    pub fn set_available(&mut self, options: FilterOptions) {
        for difficulty in &options.difficulties {
            self.set
                .difficulties
                .entry(difficulty.clone())
                .or_insert(true);
        }
        for hack_type in &options.hack_types {
            self.set.hack_types.entry(hack_type.clone()).or_insert(true);
        }
        self.available = options;
        self.persist();
    }

    pub fn set_difficulty(&mut self, value: impl Into<String>) {
        self.set.difficulty = value.into();
        self.persist();
    }

    pub fn set_hack_type(&mut self, value: impl Into<String>) {
        self.set.hack_type = value.into();
        self.persist();
    }

    pub fn set_author(&mut self, value: impl Into<String>) {
        self.set.author = value.into();
        self.persist();
    }

    pub fn set_min_rating(&mut self, value: impl Into<String>) {
        self.set.min_rating = value.into();
        self.persist();
    }

    pub fn set_status(&mut self, value: impl Into<String>) {
        self.set.status = value.into();
        self.persist();
    }

    pub fn set_rating_value(&mut self, value: f64) {
        self.set.rating_value = value;
        self.persist();
    }

    /// Toggle one multi-select difficulty.
    pub fn set_difficulty_selected(&mut self, value: impl Into<String>, selected: bool) {
        self.set.difficulties.insert(value.into(), selected);
        self.persist();
    }

    /// Toggle one multi-select hack type.
    pub fn set_hack_type_selected(&mut self, value: impl Into<String>, selected: bool) {
        self.set.hack_types.insert(value.into(), selected);
        self.persist();
    }

    /// Reset every facet to its empty representation and delete the
    /// persistence slot.
    pub fn clear(&mut self) {
        let mut cleared = FilterSet::default();
        // keep the known facet values visible, just unchecked
        for difficulty in &self.available.difficulties {
            cleared.difficulties.insert(difficulty.clone(), false);
        }
        for hack_type in &self.available.hack_types {
            cleared.hack_types.insert(hack_type.clone(), false);
        }
        self.set = cleared;

        if let Some(slot) = &self.slot {
            if let Err(e) = self.store.remove(slot) {
                warn!("failed to remove filter slot {slot}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    fn options() -> FilterOptions {
        FilterOptions {
            difficulties: vec!["Easy".to_string(), "Hard".to_string()],
            hack_types: vec!["Kaizo".to_string(), "Standard".to_string()],
        }
    }

    #[test]
    fn test_starts_with_defaults() {
        let state = FilterState::new(store(), Some("discover-filters"));
        assert!(state.set().is_unrestricted());
    }

    #[test]
    fn test_mutation_persists_full_object() {
        let store = store();
        let mut state = FilterState::new(store.clone(), Some("discover-filters"));
        state.set_difficulty("Hard");
        state.set_author("FuSoYa");

        let json = store.get("discover-filters").unwrap().unwrap();
        let saved: FilterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(saved.difficulty, "Hard");
        assert_eq!(saved.author, "FuSoYa");
    }

    #[test]
    fn test_reload_equals_saved_state() {
        let store = store();
        {
            let mut state = FilterState::new(store.clone(), Some("discover-filters"));
            state.set_min_rating("4.5");
            state.set_difficulty_selected("Hard", true);
            state.set_status("unpatched");
        }

        let reloaded = FilterState::new(store, Some("discover-filters"));
        assert_eq!(reloaded.set().min_rating, "4.5");
        assert_eq!(reloaded.set().status, "unpatched");
        assert_eq!(reloaded.set().difficulties.get("Hard"), Some(&true));
    }

    #[test]
    fn test_partial_slot_merges_over_defaults() {
        let store = store();
        store
            .set("discover-filters", r#"{"author":"carol"}"#)
            .unwrap();

        let state = FilterState::new(store, Some("discover-filters"));
        assert_eq!(state.set().author, "carol");
        assert!(state.set().difficulty.is_empty());
        assert_eq!(state.set().rating_value, 0.0);
    }

    #[test]
    fn test_corrupt_slot_falls_back_to_defaults() {
        let store = store();
        store.set("discover-filters", "not json {{").unwrap();

        let state = FilterState::new(store, Some("discover-filters"));
        assert!(state.set().is_unrestricted());
    }

    #[test]
    fn test_clear_resets_and_removes_slot() {
        let store = store();
        let mut state = FilterState::new(store.clone(), Some("discover-filters"));
        state.set_available(options());
        state.set_difficulty("Hard");
        state.set_rating_value(4.0);
        assert!(store.get("discover-filters").unwrap().is_some());

        state.clear();

        assert!(state.set().is_unrestricted());
        // slot is deleted, not overwritten with an empty object
        assert!(store.get("discover-filters").unwrap().is_none());
        // known facet values remain visible, unchecked
        assert_eq!(state.set().difficulties.get("Easy"), Some(&false));
    }

    #[test]
    fn test_clear_from_any_prior_state() {
        let mut state = FilterState::new(store(), Some("discover-filters"));
        state.set_available(options());
        state.set_author("x");
        state.set_hack_type_selected("Kaizo", true);
        state.set_min_rating("3");
        state.clear();
        assert!(state.set().is_unrestricted());
    }

    #[test]
    fn test_set_available_defaults_new_keys_to_selected() {
        let mut state = FilterState::new(store(), Some("discover-filters"));
        state.set_difficulty_selected("Easy", false);
        state.set_available(options());

        // persisted selection untouched, unknown key defaulted to true
        assert_eq!(state.set().difficulties.get("Easy"), Some(&false));
        assert_eq!(state.set().difficulties.get("Hard"), Some(&true));
    }

    #[test]
    fn test_no_slot_means_no_persistence() {
        let store = store();
        let mut state = FilterState::new(store.clone(), None);
        state.set_author("nobody");
        assert!(store.is_empty());
    }
}
