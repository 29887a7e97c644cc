use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub discover: DiscoverConfig,
    #[serde(default)]
    pub sync: SyncSettings,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("hackshelf.db")
}

/// Discovery view configuration (pagination, search index, autocomplete).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoverConfig {
    /// Rows per page in the paginated result list.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Bulk window size used to materialize rows for the search index.
    #[serde(default = "default_bulk_limit")]
    pub bulk_limit: u32,
    /// Quiet window before a search-text change triggers work.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Maximum autocomplete suggestions returned per query.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            bulk_limit: default_bulk_limit(),
            search_debounce_ms: default_search_debounce_ms(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

fn default_page_size() -> u32 {
    50
}

fn default_bulk_limit() -> u32 {
    10_000
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_max_suggestions() -> usize {
    5
}

/// Sync orchestrator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSettings {
    /// Delay between observing the `complete` event and leaving the
    /// syncing state, so the final message stays visible.
    #[serde(default = "default_complete_delay_ms")]
    pub complete_delay_ms: u64,
    /// Further delay before the progress session is cleared.
    #[serde(default = "default_clear_delay_ms")]
    pub clear_delay_ms: u64,
    /// Capacity of the bounded progress event channel.
    #[serde(default = "default_progress_channel_capacity")]
    pub progress_channel_capacity: usize,
    /// How often the relative "last synced" label is recomputed.
    #[serde(default = "default_relative_time_refresh_secs")]
    pub relative_time_refresh_secs: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            complete_delay_ms: default_complete_delay_ms(),
            clear_delay_ms: default_clear_delay_ms(),
            progress_channel_capacity: default_progress_channel_capacity(),
            relative_time_refresh_secs: default_relative_time_refresh_secs(),
        }
    }
}

fn default_complete_delay_ms() -> u64 {
    500
}

fn default_clear_delay_ms() -> u64 {
    2000
}

fn default_progress_channel_capacity() -> usize {
    32
}

fn default_relative_time_refresh_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.database.path.to_str().unwrap(), "hackshelf.db");
        assert_eq!(config.discover.page_size, 50);
        assert_eq!(config.discover.bulk_limit, 10_000);
        assert_eq!(config.discover.search_debounce_ms, 300);
        assert_eq!(config.discover.max_suggestions, 5);
        assert_eq!(config.sync.complete_delay_ms, 500);
        assert_eq!(config.sync.clear_delay_ms, 2000);
    }

    #[test]
    fn test_deserialize_partial_discover_section() {
        let toml = r#"
[discover]
page_size = 25
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.discover.page_size, 25);
        // untouched keys keep their defaults
        assert_eq!(config.discover.bulk_limit, 10_000);
    }

    #[test]
    fn test_deserialize_custom_database_path() {
        let toml = r#"
[database]
path = "/data/shelf.sqlite"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.database.path.to_str().unwrap(), "/data/shelf.sqlite");
    }

    #[test]
    fn test_deserialize_sync_section() {
        let toml = r#"
[sync]
complete_delay_ms = 100
clear_delay_ms = 400
progress_channel_capacity = 8
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sync.complete_delay_ms, 100);
        assert_eq!(config.sync.clear_delay_ms, 400);
        assert_eq!(config.sync.progress_channel_capacity, 8);
        assert_eq!(config.sync.relative_time_refresh_secs, 60);
    }
}
