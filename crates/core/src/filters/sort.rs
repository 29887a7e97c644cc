//! Sort key/direction state, persisted per view.

use std::sync::Arc;

use tracing::warn;

use crate::storage::KeyValueStore;

/// Sort key for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Date,
    Rating,
    Downloads,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Date => "date",
            SortKey::Rating => "rating",
            SortKey::Downloads => "downloads",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SortKey::Name),
            "date" => Some(SortKey::Date),
            "rating" => Some(SortKey::Rating),
            "downloads" => Some(SortKey::Downloads),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// A sort key paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Per-view sort state, persisted under `<view>-by` and `<view>-direction`.
///
/// Defaults differ per view and are supplied at construction. Unparsable
/// persisted strings fall back to the default.
pub struct SortState {
    store: Arc<dyn KeyValueStore>,
    by_slot: String,
    direction_slot: String,
    spec: SortSpec,
}

impl SortState {
    pub fn new(store: Arc<dyn KeyValueStore>, view: &str, default: SortSpec) -> Self {
        let by_slot = format!("{view}-by");
        let direction_slot = format!("{view}-direction");
        let mut spec = default;

        match store.get(&by_slot) {
            Ok(Some(raw)) => match SortKey::parse(&raw) {
                Some(key) => spec.key = key,
                None => warn!("ignoring unknown sort key {raw:?} in slot {by_slot}"),
            },
            Ok(None) => {}
            Err(e) => warn!("failed to read sort slot {by_slot}: {e}"),
        }

        match store.get(&direction_slot) {
            Ok(Some(raw)) => match SortDirection::parse(&raw) {
                Some(direction) => spec.direction = direction,
                None => warn!("ignoring unknown sort direction {raw:?} in slot {direction_slot}"),
            },
            Ok(None) => {}
            Err(e) => warn!("failed to read sort slot {direction_slot}: {e}"),
        }

        Self {
            store,
            by_slot,
            direction_slot,
            spec,
        }
    }

    pub fn spec(&self) -> SortSpec {
        self.spec
    }

    pub fn set_key(&mut self, key: SortKey) {
        self.spec.key = key;
        if let Err(e) = self.store.set(&self.by_slot, key.as_str()) {
            warn!("failed to persist sort key: {e}");
        }
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.spec.direction = direction;
        if let Err(e) = self.store.set(&self.direction_slot, direction.as_str()) {
            warn!("failed to persist sort direction: {e}");
        }
    }

    /// Flip the current direction, persisting the new value.
    pub fn toggle_direction(&mut self) {
        let flipped = match self.spec.direction {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        };
        self.set_direction(flipped);
    }
}
