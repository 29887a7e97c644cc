//! Test doubles and fixtures shared by unit and integration tests.

mod mock_catalog;
mod mock_sync_job;

pub mod fixtures;

pub use mock_catalog::MockCatalog;
pub use mock_sync_job::MockSyncJob;
