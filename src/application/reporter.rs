//! Progress/status reporter
//!
//! One-way notification sink between the sync task and whatever surface
//! observes it. Built on a watch channel: only the latest snapshot is
//! retained, so late or dropped intermediate reports are fine, and a
//! terminal snapshot stays visible to any subscriber that looks.

use tokio::sync::watch;
use tracing::debug;

use crate::domain::sync::SyncRun;

/// Last-write-wins snapshot channel observed by the UI layer.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    tx: watch::Sender<SyncRun>,
}

impl ProgressReporter {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SyncRun::idle());
        Self { tx }
    }

    /// Publish a snapshot. Idempotent and infallible: replacing the held
    /// value succeeds even with no subscribers attached.
    pub fn report(&self, run: &SyncRun) {
        debug!(
            phase = %run.phase,
            percent = run.percent,
            message = %run.message,
            "sync progress"
        );
        self.tx.send_replace(run.clone());
    }

    /// Subscribe to snapshot updates. The receiver immediately sees the
    /// latest value, terminal ones included.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncRun> {
        self.tx.subscribe()
    }

    /// The snapshot currently held by the reporter.
    #[must_use]
    pub fn latest(&self) -> SyncRun {
        self.tx.borrow().clone()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
