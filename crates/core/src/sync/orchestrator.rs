//! Sync lifecycle state machine.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, watch, RwLock};
use tracing::{debug, info, warn};

use crate::config::SyncSettings;
use crate::metrics;
use crate::storage::KeyValueStore;

use super::{format_relative_time, SyncJob, SyncProgress, SyncStage};

/// Slot holding the last successful sync time, epoch milliseconds.
pub const LAST_SYNC_SLOT: &str = "last-sync-timestamp";

type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Inner {
    syncing: bool,
    session: Option<SyncProgress>,
    last_error: Option<String>,
}

/// Drives a `SyncJob` and exposes its observable state.
///
/// `trigger()` records a synthetic starting session synchronously, then
/// runs the job on a spawned task. Completion is staged: after a short
/// delay the syncing flag drops, the timestamp is persisted and the
/// completion callback fires once; after a longer delay the session
/// clears. A failed run reverts straight to idle with the error kept for
/// display until dismissed.
pub struct SyncOrchestrator {
    settings: SyncSettings,
    store: Arc<dyn KeyValueStore>,
    job: Arc<dyn SyncJob>,
    on_complete: Option<CompletionCallback>,
    inner: Arc<RwLock<Inner>>,
}

impl SyncOrchestrator {
    pub fn new(settings: SyncSettings, store: Arc<dyn KeyValueStore>, job: Arc<dyn SyncJob>) -> Self {
        Self {
            settings,
            store,
            job,
            on_complete: None,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    /// Register the callback fired once per completed run, after the
    /// syncing flag has dropped.
    pub fn on_complete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(callback));
        self
    }

    /// Start a sync run.
    ///
    /// Not guarded: triggering while a run is active starts another run
    /// over the same session.
    pub async fn trigger(&self) {
        {
            let mut inner = self.inner.write().await;
            if inner.syncing {
                warn!("sync already in progress, starting another run");
            }
            inner.syncing = true;
            inner.session = Some(SyncProgress::starting());
            inner.last_error = None;
        }
        info!("sync run started");

        let (tx, rx) = mpsc::channel(self.settings.progress_channel_capacity);
        self.spawn_job(tx);
        self.spawn_consumer(rx);
    }

    fn spawn_job(&self, tx: mpsc::Sender<SyncProgress>) {
        let job = Arc::clone(&self.job);
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            match job.run(tx).await {
                Ok(()) => {
                    metrics::SYNC_RUNS.with_label_values(&["success"]).inc();
                }
                Err(e) => {
                    warn!("sync job failed: {e}");
                    metrics::SYNC_RUNS.with_label_values(&["failed"]).inc();
                    let mut inner = inner.write().await;
                    inner.syncing = false;
                    inner.session = None;
                    inner.last_error = Some(e.to_string());
                }
            }
            metrics::SYNC_DURATION.observe(started.elapsed().as_secs_f64());
        });
    }

    fn spawn_consumer(&self, mut rx: mpsc::Receiver<SyncProgress>) {
        let inner = Arc::clone(&self.inner);
        let store = Arc::clone(&self.store);
        let on_complete = self.on_complete.clone();
        let complete_delay = Duration::from_millis(self.settings.complete_delay_ms);
        let clear_delay = Duration::from_millis(self.settings.clear_delay_ms);

        tokio::spawn(async move {
            while let Some(progress) = rx.recv().await {
                debug!(
                    "sync progress: {} ({}/{})",
                    progress.message, progress.progress, progress.total
                );
                let stage = progress.stage;
                inner.write().await.session = Some(progress);

                if stage == SyncStage::Complete {
                    tokio::time::sleep(complete_delay).await;
                    inner.write().await.syncing = false;

                    let now_ms = Utc::now().timestamp_millis();
                    if let Err(e) = store.set(LAST_SYNC_SLOT, &now_ms.to_string()) {
                        warn!("failed to persist sync timestamp: {e}");
                    }
                    if let Some(callback) = &on_complete {
                        callback();
                    }
                    info!("sync run complete");

                    tokio::time::sleep(clear_delay).await;
                    inner.write().await.session = None;
                    break;
                }
            }
        });
    }

    pub async fn is_syncing(&self) -> bool {
        self.inner.read().await.syncing
    }

    pub async fn session(&self) -> Option<SyncProgress> {
        self.inner.read().await.session.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.inner.read().await.last_error.clone()
    }

    /// Drop the visible session and error banner early.
    pub async fn dismiss(&self) {
        let mut inner = self.inner.write().await;
        inner.session = None;
        inner.last_error = None;
    }

    /// Relative-time label for the persisted timestamp, `None` before the
    /// first successful sync.
    pub fn last_sync_label(&self) -> Option<String> {
        label_from_store(self.store.as_ref())
    }

    /// Re-emit the label on a fixed interval so "5 minutes ago" stays
    /// honest. The task ends when the receiver is dropped.
    pub fn spawn_label_refresher(&self) -> watch::Receiver<String> {
        let store = Arc::clone(&self.store);
        let interval = Duration::from_secs(self.settings.relative_time_refresh_secs);
        let (tx, rx) = watch::channel(label_from_store(store.as_ref()).unwrap_or_default());

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let label = label_from_store(store.as_ref()).unwrap_or_default();
                if tx.send(label).is_err() {
                    break;
                }
            }
        });

        rx
    }
}

fn label_from_store(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(LAST_SYNC_SLOT) {
        Ok(Some(raw)) => match raw.parse::<i64>() {
            Ok(ts) => Some(format_relative_time(ts, Utc::now())),
            Err(_) => {
                warn!("discarding unreadable sync timestamp {raw:?}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("failed to read sync timestamp: {e}");
            None
        }
    }
}
