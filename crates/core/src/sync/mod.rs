//! Background catalog sync.
//!
//! A `SyncJob` does the actual fetching and storing; the orchestrator owns
//! the observable lifecycle around it: the progress session, the syncing
//! flag, the persisted last-sync timestamp and its relative-time label.

mod orchestrator;
mod relative_time;
mod types;

pub use orchestrator::{SyncOrchestrator, LAST_SYNC_SLOT};
pub use relative_time::format_relative_time;
pub use types::{SyncError, SyncJob, SyncProgress, SyncStage};
