//! Scripted sync job.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::sync::{SyncError, SyncJob, SyncProgress};

/// Sync job that replays scripted progress events.
#[derive(Default)]
pub struct MockSyncJob {
    events: Vec<SyncProgress>,
    fail_with: Option<String>,
    hold: bool,
}

impl MockSyncJob {
    /// Emit the given events in order, then finish.
    pub fn with_events(events: Vec<SyncProgress>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    /// Never emit anything and never finish.
    pub fn pending() -> Self {
        Self {
            hold: true,
            ..Default::default()
        }
    }

    /// Fail with a fetch error before emitting anything.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Keep the run alive after the scripted events, so tests can observe
    /// mid-run state.
    pub fn hold_open(mut self) -> Self {
        self.hold = true;
        self
    }
}

#[async_trait]
impl SyncJob for MockSyncJob {
    async fn run(&self, progress: mpsc::Sender<SyncProgress>) -> Result<(), SyncError> {
        if let Some(message) = &self.fail_with {
            return Err(SyncError::Fetch(message.clone()));
        }
        for event in &self.events {
            progress
                .send(event.clone())
                .await
                .map_err(|_| SyncError::ChannelClosed)?;
        }
        if self.hold {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}
