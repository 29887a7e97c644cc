use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - discover.page_size is not 0
/// - discover.bulk_limit covers at least one page
/// - discover.max_suggestions is not 0
/// - sync.progress_channel_capacity is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.discover.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "discover.page_size cannot be 0".to_string(),
        ));
    }

    if config.discover.bulk_limit < config.discover.page_size {
        return Err(ConfigError::ValidationError(
            "discover.bulk_limit must be at least discover.page_size".to_string(),
        ));
    }

    if config.discover.max_suggestions == 0 {
        return Err(ConfigError::ValidationError(
            "discover.max_suggestions cannot be 0".to_string(),
        ));
    }

    if config.sync.progress_channel_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "sync.progress_channel_capacity cannot be 0".to_string(),
        ));
    }

    Ok(())
}
