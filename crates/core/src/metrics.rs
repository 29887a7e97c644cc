//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog queries (gateway)
//! - Search index builds and autocomplete
//! - Background sync runs

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog queries total by kind and status.
pub static CATALOG_QUERIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("hackshelf_catalog_queries_total", "Total catalog queries"),
        &["kind", "status"], // kind: "page", "bulk"; status: "ok", "error"
    )
    .unwrap()
});

/// Rows returned per catalog query.
pub static CATALOG_QUERY_ROWS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "hackshelf_catalog_query_rows",
            "Number of rows returned per catalog query",
        )
        .buckets(vec![0.0, 1.0, 10.0, 25.0, 50.0, 100.0, 1000.0, 10000.0]),
        &["kind"],
    )
    .unwrap()
});

// =============================================================================
// Search Metrics
// =============================================================================

/// Search index rebuilds total.
pub static INDEX_BUILDS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("hackshelf_index_builds_total", "Total search index rebuilds").unwrap()
});

/// Documents per index build.
pub static INDEX_DOCUMENTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "hackshelf_index_documents",
            "Number of documents per search index build",
        )
        .buckets(vec![0.0, 10.0, 100.0, 1000.0, 5000.0, 10000.0]),
    )
    .unwrap()
});

/// Autocomplete suggestion requests by match mode.
pub static SUGGESTION_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "hackshelf_suggestion_requests_total",
            "Total autocomplete suggestion requests",
        ),
        &["mode"], // "substring", "fuzzy"
    )
    .unwrap()
});

// =============================================================================
// Sync Metrics
// =============================================================================

/// Sync runs total by result.
pub static SYNC_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("hackshelf_sync_runs_total", "Total catalog sync runs"),
        &["result"], // "success", "failed", "rejected"
    )
    .unwrap()
});

/// Sync run duration in seconds.
pub static SYNC_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "hackshelf_sync_duration_seconds",
            "Duration of catalog sync runs",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Catalog
        Box::new(CATALOG_QUERIES.clone()),
        Box::new(CATALOG_QUERY_ROWS.clone()),
        // Search
        Box::new(INDEX_BUILDS.clone()),
        Box::new(INDEX_DOCUMENTS.clone()),
        Box::new(SUGGESTION_REQUESTS.clone()),
        // Sync
        Box::new(SYNC_RUNS.clone()),
        Box::new(SYNC_DURATION.clone()),
    ]
}
