//! Facet filter state, sort state and view-mode preference.
//!
//! Single-select facets drive the library view; multi-select maps drive the
//! discovery view. Both are representations of the same facets and persist
//! to named durable slots so a session restart restores them verbatim.

mod sort;
mod state;
mod types;
mod view_mode;

pub use sort::{SortDirection, SortKey, SortSpec, SortState};
pub use state::FilterState;
pub use types::FilterSet;
pub use view_mode::{ViewMode, ViewModeState};
