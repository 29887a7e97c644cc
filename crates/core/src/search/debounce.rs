//! Quiet-window debouncing for search input.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

/// Forwards the most recent value only after input has been quiet for the
/// configured window. Rapid feeds supersede earlier pending values, so
/// consumers never see intermediate keystrokes.
pub struct Debouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl Debouncer {
    /// Spawn the debounce task. The returned receiver starts at the empty
    /// string and changes once per settled value.
    pub fn spawn(window: Duration) -> (Self, watch::Receiver<String>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let (out_tx, out_rx) = watch::channel(String::new());

        tokio::spawn(async move {
            let mut pending: Option<String> = None;
            loop {
                match pending.take() {
                    Some(value) => {
                        tokio::select! {
                            next = rx.recv() => match next {
                                Some(next) => pending = Some(next),
                                None => {
                                    // input side dropped, flush what we have
                                    let _ = out_tx.send(value);
                                    break;
                                }
                            },
                            _ = tokio::time::sleep(window) => {
                                if out_tx.send(value).is_err() {
                                    break;
                                }
                            }
                        }
                    }
                    None => match rx.recv().await {
                        Some(next) => pending = Some(next),
                        None => break,
                    },
                }
            }
        });

        (Self { tx }, out_rx)
    }

    /// Feed a new input value, restarting the quiet window.
    pub fn feed(&self, value: impl Into<String>) {
        // receiver only goes away when the task is shut down
        let _ = self.tx.send(value.into());
    }
}
