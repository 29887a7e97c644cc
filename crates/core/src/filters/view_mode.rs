//! Result list presentation mode, persisted per view.

use std::sync::Arc;

use tracing::warn;

use crate::storage::KeyValueStore;

/// How the result list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Cards,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::List => "list",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cards" => Some(ViewMode::Cards),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

/// Persisted view mode. Unknown stored values fall back to `Cards`.
pub struct ViewModeState {
    store: Arc<dyn KeyValueStore>,
    slot: String,
    mode: ViewMode,
}

impl ViewModeState {
    pub fn new(store: Arc<dyn KeyValueStore>, slot: &str) -> Self {
        let mode = match store.get(slot) {
            Ok(Some(raw)) => ViewMode::parse(&raw).unwrap_or_default(),
            Ok(None) => ViewMode::default(),
            Err(e) => {
                warn!("failed to read view mode slot {slot}: {e}");
                ViewMode::default()
            }
        };
        Self {
            store,
            slot: slot.to_string(),
            mode,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set(&mut self, mode: ViewMode) {
        self.mode = mode;
        if let Err(e) = self.store.set(&self.slot, mode.as_str()) {
            warn!("failed to persist view mode: {e}");
        }
    }
}
