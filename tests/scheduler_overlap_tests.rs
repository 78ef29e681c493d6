//! Scheduler behavior against a real SQLite store
//!
//! Verifies the at-most-one-active-run guarantee end to end: overlapping
//! ticks must not produce duplicate work or duplicate rows.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use post_sync::application::reporter::ProgressReporter;
use post_sync::application::scheduler::PeriodicScheduler;
use post_sync::application::sync_task::SyncService;
use post_sync::domain::errors::FetchError;
use post_sync::domain::record::Record;
use post_sync::domain::repositories::RecordRepository;
use post_sync::domain::services::RemoteSource;
use post_sync::infrastructure::database_connection::DatabaseConnection;
use post_sync::infrastructure::record_repository::SqliteRecordRepository;

/// Remote stub that serves the same batch on every call, slowly enough
/// that scheduler ticks land while a run is still in flight.
struct SlowRemote {
    fetches: AtomicUsize,
    delay: Duration,
}

#[async_trait]
impl RemoteSource for SlowRemote {
    async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(vec![
            Record::new(1, 1, "A", "x"),
            Record::new(2, 2, "B", "y"),
        ])
    }
}

#[tokio::test]
async fn overlapping_ticks_produce_the_single_run_state() {
    let temp_dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", temp_dir.path().join("overlap.db").display());
    let db = DatabaseConnection::new(&url).await.unwrap();
    db.migrate().await.unwrap();
    let store = Arc::new(SqliteRecordRepository::new(db.pool().clone()));

    let remote = Arc::new(SlowRemote {
        fetches: AtomicUsize::new(0),
        delay: Duration::from_millis(150),
    });
    let service = SyncService::new(
        Arc::clone(&remote) as Arc<dyn RemoteSource>,
        Arc::clone(&store) as Arc<dyn RecordRepository>,
        ProgressReporter::new(),
    );

    let mut scheduler = PeriodicScheduler::new(service.clone());
    // Ticks every 25ms against a 150ms fetch: the second and later ticks
    // land mid-run and must be dropped.
    scheduler.start(Duration::from_millis(25));

    tokio::time::sleep(Duration::from_millis(120)).await;
    scheduler.stop().await;
    service.wait_for_inflight().await;

    assert_eq!(remote.fetches.load(Ordering::SeqCst), 1);
    let ids: Vec<i64> = store.scan().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn consecutive_completed_runs_stay_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", temp_dir.path().join("cadence.db").display());
    let db = DatabaseConnection::new(&url).await.unwrap();
    db.migrate().await.unwrap();
    let store = Arc::new(SqliteRecordRepository::new(db.pool().clone()));

    let remote = Arc::new(SlowRemote {
        fetches: AtomicUsize::new(0),
        delay: Duration::from_millis(1),
    });
    let service = SyncService::new(
        Arc::clone(&remote) as Arc<dyn RemoteSource>,
        Arc::clone(&store) as Arc<dyn RecordRepository>,
        ProgressReporter::new(),
    );

    let mut scheduler = PeriodicScheduler::new(service.clone());
    scheduler.start(Duration::from_millis(20));

    // Enough time for several full runs back to back.
    tokio::time::sleep(Duration::from_millis(110)).await;
    scheduler.stop().await;
    service.wait_for_inflight().await;

    assert!(remote.fetches.load(Ordering::SeqCst) >= 2);
    // Re-running the same batch never duplicates rows.
    assert_eq!(store.count().await.unwrap(), 2);
}
