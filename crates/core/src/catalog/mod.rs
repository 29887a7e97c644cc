//! Hack catalog - the locally cached copy of the remote hack listing.
//!
//! `CatalogStore` is the sole data-access boundary: the rest of the crate
//! only ever sees `{pagination, sort, facets} -> rows`. The sqlite
//! implementation backs the real app; tests run against the mock in
//! `crate::testing`.

mod gateway;
mod sqlite;
mod types;

pub use gateway::CatalogGateway;
pub use sqlite::SqliteCatalog;
pub use types::*;

use async_trait::async_trait;

/// Trait for catalog storage and querying.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Run a filtered, sorted, paginated query and return matching rows.
    async fn query(&self, query: &CatalogQuery) -> Result<Vec<HackRow>, CatalogError>;

    /// Distinct facet values currently present in the catalog.
    async fn filter_options(&self) -> Result<FilterOptions, CatalogError>;

    /// Upsert rows fetched by the sync job, keyed by id.
    ///
    /// Returns the number of rows that were new (not updates). Local-only
    /// columns (`file_path`) are left untouched on update.
    async fn store_rows(&self, rows: &[HackRow]) -> Result<u32, CatalogError>;
}
