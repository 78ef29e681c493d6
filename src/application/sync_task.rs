//! Sync task orchestration
//!
//! One end-to-end fetch → reconcile → persist execution, reported phase by
//! phase to the progress reporter. Only one run may be active at a time;
//! re-entrant triggers while a run is in flight are dropped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::application::reconciler::reconcile;
use crate::application::reporter::ProgressReporter;
use crate::domain::errors::StoreError;
use crate::domain::repositories::RecordRepository;
use crate::domain::services::RemoteSource;
use crate::domain::sync::{SyncPhase, SyncRun};

/// Result of one sync attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The run reached `Done`. `inserted <= selected`; the difference is
    /// records that failed individually and were skipped.
    Completed { inserted: usize, selected: usize },
    /// The run ended in `Failed` with a human-readable cause.
    Failed(String),
    /// A run was already active; this trigger was dropped.
    Skipped,
}

/// Orchestrates sync runs over the injected remote source and store.
#[derive(Clone)]
pub struct SyncService {
    remote: Arc<dyn RemoteSource>,
    store: Arc<dyn RecordRepository>,
    reporter: ProgressReporter,
    active: Arc<AtomicBool>,
    inflight: Arc<Mutex<Option<JoinHandle<SyncOutcome>>>>,
}

impl SyncService {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        store: Arc<dyn RecordRepository>,
        reporter: ProgressReporter,
    ) -> Self {
        Self {
            remote,
            store,
            reporter,
            active: Arc::new(AtomicBool::new(false)),
            inflight: Arc::new(Mutex::new(None)),
        }
    }

    /// Whether a run is currently in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Atomically claim the single active-run slot.
    fn claim(&self) -> bool {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Run one sync to completion. Returns [`SyncOutcome::Skipped`] without
    /// doing any work if a run is already active.
    pub async fn run_once(&self) -> SyncOutcome {
        if !self.claim() {
            debug!("sync already active, dropping trigger");
            return SyncOutcome::Skipped;
        }
        self.execute_claimed().await
    }

    /// Start a sync in the background. Returns `false` if a run is already
    /// active and the trigger was dropped.
    ///
    /// The claim is taken here, before spawning, so two back-to-back
    /// triggers can never both win: the loser returns `false` and leaves
    /// the winner's in-flight handle untouched.
    pub async fn trigger(&self) -> bool {
        if !self.claim() {
            debug!("sync already active, dropping trigger");
            return false;
        }
        let service = self.clone();
        let handle = tokio::spawn(async move { service.execute_claimed().await });
        *self.inflight.lock().await = Some(handle);
        true
    }

    /// Execute a run whose claim the caller already holds, releasing the
    /// claim when the run ends.
    async fn execute_claimed(&self) -> SyncOutcome {
        let outcome = self.execute().await;
        self.active.store(false, Ordering::Release);
        outcome
    }

    /// Await the in-flight run, if any. Used during shutdown so teardown
    /// never interrupts a running sync.
    pub async fn wait_for_inflight(&self) {
        let handle = self.inflight.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("in-flight sync task panicked: {e}");
            }
        }
    }

    async fn execute(&self) -> SyncOutcome {
        let mut run = SyncRun::started();
        info!(run_id = %run.run_id, "sync run started");

        run.advance(SyncPhase::Fetching, 20, "fetching records");
        self.reporter.report(&run);

        let batch = match self.remote.fetch().await {
            Ok(batch) => batch,
            Err(e) => {
                error!(run_id = %run.run_id, "fetch failed: {e}");
                run.fail(format!("fetch failed: {e}"));
                self.reporter.report(&run);
                return SyncOutcome::Failed(run.message);
            }
        };

        run.advance(
            SyncPhase::Reconciling,
            50,
            format!("fetched {} records", batch.len()),
        );
        self.reporter.report(&run);

        let selected = match reconcile(&batch, self.store.as_ref()).await {
            Ok(selected) => selected,
            Err(e) => {
                error!(run_id = %run.run_id, "store unavailable during reconcile: {e}");
                run.fail(format!("store unavailable: {e}"));
                self.reporter.report(&run);
                return SyncOutcome::Failed(run.message);
            }
        };

        run.advance(
            SyncPhase::Persisting,
            70,
            format!("persisting {} new records", selected.len()),
        );
        self.reporter.report(&run);

        let mut inserted = 0usize;
        let mut io_failures = 0usize;
        for record in &selected {
            match self.store.insert(record).await {
                Ok(()) => inserted += 1,
                Err(StoreError::Conflict { id }) => {
                    // The reconciler checked existence just before; another
                    // writer beat us to this id. Recovered by skipping.
                    warn!(run_id = %run.run_id, id, "insert lost race, record already present");
                }
                Err(e @ StoreError::Io(_)) => {
                    warn!(run_id = %run.run_id, id = record.id, "insert failed: {e}");
                    io_failures += 1;
                }
            }
        }

        // Every attempted insert hitting a storage failure means the store
        // itself is gone, not a bad record.
        if !selected.is_empty() && io_failures == selected.len() {
            error!(run_id = %run.run_id, "all {} inserts failed, store unavailable", selected.len());
            run.fail(format!(
                "store unavailable: all {} inserts failed",
                selected.len()
            ));
            self.reporter.report(&run);
            return SyncOutcome::Failed(run.message);
        }

        let summary = if io_failures > 0 {
            format!(
                "{inserted}/{} records inserted ({io_failures} failed)",
                selected.len()
            )
        } else {
            format!("{inserted}/{} records inserted", selected.len())
        };
        run.advance(SyncPhase::Done, 100, summary);
        self.reporter.report(&run);
        info!(run_id = %run.run_id, "sync run finished: {}", run.message);

        SyncOutcome::Completed {
            inserted,
            selected: selected.len(),
        }
    }
}
