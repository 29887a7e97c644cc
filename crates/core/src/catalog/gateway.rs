//! Query gateway over the catalog boundary.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::filters::{FilterSet, SortSpec};
use crate::metrics;

use super::{CatalogFilters, CatalogQuery, CatalogStore, FilterOptions, HackRow, Pagination};

/// Thin front over a `CatalogStore`.
///
/// Translates `{filters, sort, pagination}` into one call against the
/// boundary and absorbs failures: a failed query surfaces as an empty row
/// set plus a logged warning, never an error. There is no retry policy
/// here - callers decide when to re-query.
#[derive(Clone)]
pub struct CatalogGateway {
    store: Arc<dyn CatalogStore>,
}

impl CatalogGateway {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Fetch one UI page of rows.
    pub async fn query_page(
        &self,
        page: u32,
        page_size: u32,
        sort: SortSpec,
        facets: &FilterSet,
    ) -> Vec<HackRow> {
        self.run(
            CatalogQuery {
                pagination: Pagination::Page { page, page_size },
                sort,
                filters: CatalogFilters::from(facets),
            },
            "page",
        )
        .await
    }

    /// Fetch a bulk window starting at offset 0, used to materialize rows
    /// for the search index.
    pub async fn query_bulk(&self, limit: u32, sort: SortSpec, facets: &FilterSet) -> Vec<HackRow> {
        self.run(
            CatalogQuery {
                pagination: Pagination::Bulk { limit },
                sort,
                filters: CatalogFilters::from(facets),
            },
            "bulk",
        )
        .await
    }

    async fn run(&self, query: CatalogQuery, kind: &str) -> Vec<HackRow> {
        match self.store.query(&query).await {
            Ok(rows) => {
                metrics::CATALOG_QUERIES.with_label_values(&[kind, "ok"]).inc();
                metrics::CATALOG_QUERY_ROWS
                    .with_label_values(&[kind])
                    .observe(rows.len() as f64);
                debug!("catalog {kind} query returned {} rows", rows.len());
                rows
            }
            Err(e) => {
                metrics::CATALOG_QUERIES
                    .with_label_values(&[kind, "error"])
                    .inc();
                warn!("catalog {kind} query failed: {e}");
                Vec::new()
            }
        }
    }

    /// Facet values for the filter sidebar. Falls back to empty options on
    /// failure.
    pub async fn filter_options(&self) -> FilterOptions {
        match self.store.filter_options().await {
            Ok(options) => options,
            Err(e) => {
                warn!("failed to load filter options: {e}");
                FilterOptions::default()
            }
        }
    }
}
