//! Sync job contract and progress events.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Lifecycle stage of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStage {
    Fetching,
    Processing,
    Complete,
}

/// One progress event. `progress`/`total` are item counts, both zero while
/// fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncProgress {
    pub stage: SyncStage,
    pub message: String,
    pub progress: u32,
    pub total: u32,
}

impl SyncProgress {
    /// The synthetic session recorded at trigger time, before the job has
    /// emitted anything.
    pub fn starting() -> Self {
        Self {
            stage: SyncStage::Fetching,
            message: "Starting sync...".to_string(),
            progress: 0,
            total: 0,
        }
    }

    pub fn fetching(message: impl Into<String>) -> Self {
        Self {
            stage: SyncStage::Fetching,
            message: message.into(),
            progress: 0,
            total: 0,
        }
    }

    pub fn processing(message: impl Into<String>, progress: u32, total: u32) -> Self {
        Self {
            stage: SyncStage::Processing,
            message: message.into(),
            progress,
            total,
        }
    }

    pub fn complete(message: impl Into<String>, total: u32) -> Self {
        Self {
            stage: SyncStage::Complete,
            message: message.into(),
            progress: total,
            total,
        }
    }
}

/// Errors for sync runs.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Progress channel closed")]
    ChannelClosed,
}

/// Trait for the actual sync work.
///
/// Runs fire-and-forget from the orchestrator's point of view; progress
/// arrives only through the bounded channel.
#[async_trait]
pub trait SyncJob: Send + Sync {
    async fn run(&self, progress: mpsc::Sender<SyncProgress>) -> Result<(), SyncError>;
}
