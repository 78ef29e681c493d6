//! post-sync host binary
//!
//! Wires configuration, logging, the SQLite store, the HTTP remote source
//! and the periodic scheduler together, then runs until Ctrl-C. Shutdown
//! stops future ticks and lets the in-flight sync run finish.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use post_sync::application::reporter::ProgressReporter;
use post_sync::application::scheduler::PeriodicScheduler;
use post_sync::application::sync_task::SyncService;
use post_sync::domain::repositories::RecordRepository;
use post_sync::domain::services::RemoteSource;
use post_sync::infrastructure::config::ConfigManager;
use post_sync::infrastructure::database_connection::DatabaseConnection;
use post_sync::infrastructure::logging;
use post_sync::infrastructure::record_repository::SqliteRecordRepository;
use post_sync::infrastructure::remote_client::{HttpRemoteSource, RemoteClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load_config().await?;
    logging::init_logging_with_config(&config.logging)?;
    info!("configuration loaded from {:?}", config_manager.config_path());

    let db = DatabaseConnection::new(&config.sync.database_url).await?;
    db.migrate().await?;
    let store: Arc<dyn RecordRepository> =
        Arc::new(SqliteRecordRepository::new(db.pool().clone()));
    info!(
        "store ready at {} with {} records",
        config.sync.database_url,
        store.count().await?
    );

    let remote: Arc<dyn RemoteSource> = Arc::new(HttpRemoteSource::new(RemoteClientConfig {
        endpoint_url: config.sync.endpoint_url.clone(),
        timeout_seconds: config.sync.fetch_timeout_seconds,
        ..RemoteClientConfig::default()
    })?);

    let reporter = ProgressReporter::new();
    let service = SyncService::new(remote, Arc::clone(&store), reporter.clone());

    // Drain progress snapshots the way an observing surface would; after a
    // terminal snapshot, log what the store now holds (display refresh).
    let mut progress_rx = reporter.subscribe();
    let display_store = Arc::clone(&store);
    tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let run = progress_rx.borrow_and_update().clone();
            info!("[{}] {}% {}", run.phase, run.percent, run.message);
            if run.is_terminal() {
                match display_store.count().await {
                    Ok(count) => info!("store now holds {count} records"),
                    Err(e) => warn!("display refresh failed: {e}"),
                }
            }
        }
    });

    let mut scheduler = PeriodicScheduler::new(service.clone());
    scheduler.start(Duration::from_secs(config.sync.interval_seconds));

    // First sync right away; the scheduler covers the cadence from here.
    service.trigger().await;

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested, stopping scheduler");
    scheduler.stop().await;
    service.wait_for_inflight().await;
    db.close().await;
    info!("shutdown complete");

    Ok(())
}
