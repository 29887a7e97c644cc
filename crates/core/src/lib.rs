pub mod catalog;
pub mod config;
pub mod discover;
pub mod filters;
pub mod metrics;
pub mod pagination;
pub mod search;
pub mod storage;
pub mod sync;
pub mod testing;

pub use catalog::{CatalogError, CatalogGateway, CatalogStore, HackRow, SqliteCatalog};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use discover::DiscoverController;
pub use filters::{FilterSet, FilterState, SortDirection, SortKey, SortSpec, SortState};
pub use pagination::{PageItem, PageState};
pub use search::{Autocomplete, AutocompleteState, Debouncer, SearchIndex};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StoreError};
pub use sync::{SyncError, SyncJob, SyncOrchestrator, SyncProgress, SyncStage};
