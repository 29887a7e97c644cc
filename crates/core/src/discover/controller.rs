//! Discovery view controller.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{CatalogGateway, HackRow};
use crate::config::DiscoverConfig;
use crate::filters::{FilterSet, FilterState, SortKey, SortSpec, SortState};
use crate::pagination::PageState;
use crate::search::{Autocomplete, Suggestion, MIN_QUERY_LEN};
use crate::storage::KeyValueStore;

use super::LatestSlot;

const FILTER_SLOT: &str = "discover-filters";
const SORT_VIEW: &str = "discover";

/// Owns everything the discovery view derives its rows from: persisted
/// facets and sort, the current page, the settled search text and the
/// cached bulk index.
///
/// Derivation is one-way. With search text of at least two characters the
/// displayed rows come from the fuzzy index over a lazily loaded bulk
/// window; otherwise from a paginated catalog query plus a `PageState`.
/// Responses land through a `LatestSlot` so an older in-flight query can
/// never overwrite a newer result.
pub struct DiscoverController {
    config: DiscoverConfig,
    gateway: CatalogGateway,
    filters: FilterState,
    sort: SortState,
    query: String,
    current_page: u32,
    loading: bool,
    /// Bumped whenever the bulk row set may have changed (facets, sync).
    bulk_generation: u64,
    cached: Option<(u64, Autocomplete)>,
    slot: LatestSlot<(Vec<HackRow>, Option<PageState>)>,
    rows: Vec<HackRow>,
    page_state: Option<PageState>,
}

impl DiscoverController {
    pub fn new(
        config: DiscoverConfig,
        gateway: CatalogGateway,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let filters = FilterState::new(store.clone(), Some(FILTER_SLOT));
        let sort = SortState::new(store, SORT_VIEW, SortSpec::default());
        Self {
            config,
            gateway,
            filters,
            sort,
            query: String::new(),
            current_page: 1,
            loading: false,
            bulk_generation: 0,
            cached: None,
            slot: LatestSlot::new(),
            rows: Vec::new(),
            page_state: None,
        }
    }

    /// Load facet options from the catalog and run the first query.
    pub async fn init(&mut self) {
        let options = self.gateway.filter_options().await;
        self.filters.set_available(options);
        self.refresh().await;
    }

    pub fn rows(&self) -> &[HackRow] {
        &self.rows
    }

    /// `None` while search results are displayed.
    pub fn page_state(&self) -> Option<PageState> {
        self.page_state
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &FilterSet {
        self.filters.set()
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort.spec()
    }

    /// Apply settled (debounced) search text.
    pub async fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.current_page = 1;
        self.refresh().await;
    }

    pub async fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
        self.refresh().await;
    }

    pub async fn set_sort_key(&mut self, key: SortKey) {
        self.sort.set_key(key);
        self.current_page = 1;
        self.refresh().await;
    }

    pub async fn toggle_sort_direction(&mut self) {
        self.sort.toggle_direction();
        self.current_page = 1;
        self.refresh().await;
    }

    pub async fn set_difficulty_selected(&mut self, value: impl Into<String>, selected: bool) {
        self.filters.set_difficulty_selected(value, selected);
        self.facets_changed().await;
    }

    pub async fn set_hack_type_selected(&mut self, value: impl Into<String>, selected: bool) {
        self.filters.set_hack_type_selected(value, selected);
        self.facets_changed().await;
    }

    pub async fn set_author(&mut self, value: impl Into<String>) {
        self.filters.set_author(value);
        self.facets_changed().await;
    }

    pub async fn set_min_rating(&mut self, value: impl Into<String>) {
        self.filters.set_min_rating(value);
        self.facets_changed().await;
    }

    pub async fn set_rating_value(&mut self, value: f64) {
        self.filters.set_rating_value(value);
        self.facets_changed().await;
    }

    pub async fn set_status(&mut self, value: impl Into<String>) {
        self.filters.set_status(value);
        self.facets_changed().await;
    }

    pub async fn clear_filters(&mut self) {
        self.filters.clear();
        self.facets_changed().await;
    }

    /// The backing catalog changed underneath us (sync completed): drop
    /// the cached bulk window and re-query, keeping the current page.
    pub async fn mark_dirty(&mut self) {
        self.invalidate_bulk();
        self.refresh().await;
    }

    /// Autocomplete for live (undebounced) input. Loads the bulk window
    /// on the first keystroke.
    pub async fn suggestions(&mut self, input: &str) -> Vec<Suggestion> {
        if input.trim().is_empty() {
            return Vec::new();
        }
        self.ensure_autocomplete().await;
        match &self.cached {
            Some((_, autocomplete)) => autocomplete.suggestions(input, self.config.max_suggestions),
            None => Vec::new(),
        }
    }

    pub async fn refresh(&mut self) {
        self.loading = true;
        let token = self.slot.begin();

        let searching = self.query.trim().chars().count() >= MIN_QUERY_LEN;
        if searching {
            self.ensure_autocomplete().await;
            let ranked = match &self.cached {
                Some((_, autocomplete)) => autocomplete
                    .index()
                    .search(&self.query, self.config.page_size as usize),
                None => Vec::new(),
            };
            self.slot.commit(token, (ranked, None));
        } else {
            let rows = self
                .gateway
                .query_page(
                    self.current_page,
                    self.config.page_size,
                    self.sort.spec(),
                    self.filters.set(),
                )
                .await;
            let page_state =
                PageState::from_result_count(self.current_page, rows.len(), self.config.page_size);
            self.slot.commit(token, (rows, Some(page_state)));
        }

        if let Some((rows, page_state)) = self.slot.latest() {
            self.rows = rows;
            self.page_state = page_state;
        }
        self.loading = false;
    }

    async fn facets_changed(&mut self) {
        self.current_page = 1;
        self.invalidate_bulk();
        self.refresh().await;
    }

    fn invalidate_bulk(&mut self) {
        self.bulk_generation = self.bulk_generation.wrapping_add(1);
    }

    async fn ensure_autocomplete(&mut self) {
        let generation = self.bulk_generation;
        if self.cached.as_ref().map(|(g, _)| *g) == Some(generation) {
            return;
        }
        debug!("loading bulk window for search index (generation {generation})");
        let rows = self
            .gateway
            .query_bulk(self.config.bulk_limit, SortSpec::default(), self.filters.set())
            .await;
        self.cached = Some((generation, Autocomplete::build(rows)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::{fixtures, MockCatalog};

    fn controller(mock: &Arc<MockCatalog>) -> DiscoverController {
        DiscoverController::new(
            DiscoverConfig::default(),
            CatalogGateway::new(mock.clone()),
            Arc::new(MemoryStore::new()),
        )
    }

    async fn seeded(count: u32) -> (Arc<MockCatalog>, DiscoverController) {
        let mock = Arc::new(MockCatalog::new());
        mock.set_rows(
            (0..count)
                .map(|i| fixtures::hack_row(i, &format!("Mario Hack {i:03}")))
                .collect(),
        )
        .await;
        let controller = controller(&mock);
        (mock, controller)
    }

    #[tokio::test]
    async fn test_paginated_path_derives_page_state() {
        let (_, mut controller) = seeded(120).await;
        controller.refresh().await;

        assert_eq!(controller.rows().len(), 50);
        let page_state = controller.page_state().unwrap();
        assert!(page_state.has_more_pages);
        assert_eq!(page_state.estimated_last_page, 10);
    }

    #[tokio::test]
    async fn test_page_navigation() {
        let (_, mut controller) = seeded(120).await;
        controller.set_page(3).await;

        assert_eq!(controller.current_page(), 3);
        assert_eq!(controller.rows().len(), 20);
        assert!(controller.page_state().unwrap().is_last_page);
    }

    #[tokio::test]
    async fn test_filter_change_resets_page() {
        let (mock, mut controller) = seeded(120).await;
        controller.set_page(3).await;
        controller.set_min_rating("4").await;

        assert_eq!(controller.current_page(), 1);
        let queries = mock.recorded_queries().await;
        let last = queries.last().unwrap();
        assert_eq!(
            last.pagination,
            crate::catalog::Pagination::Page {
                page: 1,
                page_size: 50
            }
        );
        assert_eq!(last.filters.min_rating, Some(4.0));
    }

    #[tokio::test]
    async fn test_sort_change_resets_page() {
        let (_, mut controller) = seeded(120).await;
        controller.set_page(2).await;
        controller.set_sort_key(SortKey::Rating).await;
        assert_eq!(controller.current_page(), 1);
    }

    #[tokio::test]
    async fn test_search_loads_bulk_window_lazily_and_once() {
        let (mock, mut controller) = seeded(30).await;
        controller.refresh().await;
        assert_eq!(mock.bulk_query_count().await, 0);

        controller.set_query("mario").await;
        assert_eq!(mock.bulk_query_count().await, 1);
        assert!(!controller.rows().is_empty());
        assert!(controller.page_state().is_none());

        // refinement reuses the cached index
        controller.set_query("mario hack").await;
        assert_eq!(mock.bulk_query_count().await, 1);
    }

    #[tokio::test]
    async fn test_facet_change_invalidates_bulk_window() {
        let (mock, mut controller) = seeded(30).await;
        controller.set_query("mario").await;
        assert_eq!(mock.bulk_query_count().await, 1);

        controller.set_min_rating("3").await;
        // still searching, so the bulk window reloads under the new facets
        assert_eq!(mock.bulk_query_count().await, 2);
    }

    #[tokio::test]
    async fn test_clearing_query_returns_to_pagination() {
        let (_, mut controller) = seeded(120).await;
        controller.set_query("mario").await;
        assert!(controller.page_state().is_none());

        controller.set_query("").await;
        assert_eq!(controller.rows().len(), 50);
        assert!(controller.page_state().is_some());
        assert_eq!(controller.current_page(), 1);
    }

    #[tokio::test]
    async fn test_short_query_stays_on_pagination() {
        let (mock, mut controller) = seeded(120).await;
        controller.set_query("m").await;
        assert!(controller.page_state().is_some());
        assert_eq!(mock.bulk_query_count().await, 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_clears_loading_and_rows() {
        let (mock, mut controller) = seeded(120).await;
        mock.fail_next("db gone").await;
        controller.refresh().await;

        assert!(!controller.is_loading());
        assert!(controller.rows().is_empty());
    }

    #[tokio::test]
    async fn test_mark_dirty_requeries_and_reloads_bulk() {
        let (mock, mut controller) = seeded(30).await;
        controller.set_query("mario").await;
        assert_eq!(mock.bulk_query_count().await, 1);

        mock.set_rows(
            (0..40)
                .map(|i| fixtures::hack_row(i, &format!("Mario Hack {i:03}")))
                .collect(),
        )
        .await;
        controller.mark_dirty().await;

        assert_eq!(mock.bulk_query_count().await, 2);
        assert_eq!(controller.rows().len(), 40);
    }

    #[tokio::test]
    async fn test_suggestions_bounded_and_lazy() {
        let (mock, mut controller) = seeded(30).await;
        assert!(controller.suggestions("").await.is_empty());
        assert_eq!(mock.bulk_query_count().await, 0);

        let suggestions = controller.suggestions("mario").await;
        assert_eq!(mock.bulk_query_count().await, 1);
        assert_eq!(suggestions.len(), 5); // max_suggestions default
    }

    #[tokio::test]
    async fn test_init_publishes_filter_options() {
        let mock = Arc::new(MockCatalog::new());
        mock.set_filter_options(crate::catalog::FilterOptions {
            difficulties: vec!["Easy".to_string()],
            hack_types: vec!["Kaizo".to_string()],
        })
        .await;
        let mut controller = controller(&mock);
        controller.init().await;

        assert_eq!(controller.filters().difficulties.get("Easy"), Some(&true));
        assert_eq!(controller.filters().hack_types.get("Kaizo"), Some(&true));
    }
}
