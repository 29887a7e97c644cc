//! Scripted in-memory catalog store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{
    CatalogError, CatalogQuery, CatalogStore, FilterOptions, HackRow, Pagination,
};

#[derive(Default)]
struct State {
    rows: Vec<HackRow>,
    filter_options: FilterOptions,
    fail_with: Option<String>,
    recorded_queries: Vec<CatalogQuery>,
    stored: Vec<HackRow>,
}

/// Catalog mock returning scripted rows.
///
/// Queries record themselves and apply only the pagination window; any
/// filtering or ordering the test cares about goes into the scripted rows.
/// `fail_next` makes the next call (whichever method) return an error.
#[derive(Default)]
pub struct MockCatalog {
    state: Arc<RwLock<State>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_rows(&self, rows: Vec<HackRow>) {
        self.state.write().await.rows = rows;
    }

    pub async fn set_filter_options(&self, options: FilterOptions) {
        self.state.write().await.filter_options = options;
    }

    pub async fn fail_next(&self, message: &str) {
        self.state.write().await.fail_with = Some(message.to_string());
    }

    pub async fn recorded_queries(&self) -> Vec<CatalogQuery> {
        self.state.read().await.recorded_queries.clone()
    }

    /// Queries recorded with a `Bulk` pagination window.
    pub async fn bulk_query_count(&self) -> usize {
        self.state
            .read()
            .await
            .recorded_queries
            .iter()
            .filter(|q| matches!(q.pagination, Pagination::Bulk { .. }))
            .count()
    }

    pub async fn stored_rows(&self) -> Vec<HackRow> {
        self.state.read().await.stored.clone()
    }
}

#[async_trait]
impl CatalogStore for MockCatalog {
    async fn query(&self, query: &CatalogQuery) -> Result<Vec<HackRow>, CatalogError> {
        let mut state = self.state.write().await;
        state.recorded_queries.push(query.clone());
        if let Some(message) = state.fail_with.take() {
            return Err(CatalogError::Database(message));
        }

        let (limit, offset) = query.pagination.limit_offset();
        Ok(state
            .rows
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn filter_options(&self) -> Result<FilterOptions, CatalogError> {
        let mut state = self.state.write().await;
        if let Some(message) = state.fail_with.take() {
            return Err(CatalogError::Database(message));
        }
        Ok(state.filter_options.clone())
    }

    async fn store_rows(&self, rows: &[HackRow]) -> Result<u32, CatalogError> {
        let mut state = self.state.write().await;
        if let Some(message) = state.fail_with.take() {
            return Err(CatalogError::Database(message));
        }
        let mut new_count = 0;
        for row in rows {
            if !state.stored.iter().any(|r| r.id == row.id) {
                new_count += 1;
            }
            state.stored.retain(|r| r.id != row.id);
            state.stored.push(row.clone());
        }
        Ok(new_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SortSpec;
    use crate::testing::fixtures;

    fn page_query(page: u32, page_size: u32) -> CatalogQuery {
        CatalogQuery {
            pagination: Pagination::Page { page, page_size },
            sort: SortSpec::default(),
            filters: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_windowing() {
        let mock = MockCatalog::new();
        mock.set_rows((0..7).map(|i| fixtures::hack_row(i, "Hack")).collect())
            .await;

        let rows = mock.query(&page_query(2, 3)).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, 3);

        let rows = mock.query(&page_query(3, 3)).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_fail_next_is_single_shot() {
        let mock = MockCatalog::new();
        mock.fail_next("boom").await;
        assert!(mock.query(&page_query(1, 10)).await.is_err());
        assert!(mock.query(&page_query(1, 10)).await.is_ok());
    }

    #[tokio::test]
    async fn test_store_rows_counts_new() {
        let mock = MockCatalog::new();
        let rows = vec![fixtures::hack_row(1, "One"), fixtures::hack_row(2, "Two")];
        assert_eq!(mock.store_rows(&rows).await.unwrap(), 2);
        assert_eq!(mock.store_rows(&rows).await.unwrap(), 0);
        assert_eq!(mock.stored_rows().await.len(), 2);
    }
}
