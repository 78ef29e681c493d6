//! Periodic scheduler
//!
//! Drives sync runs on a fixed cadence. A tick that lands while a run is
//! still in flight is skipped, not queued; `stop()` cancels future ticks
//! but never interrupts the run in progress.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::application::sync_task::SyncService;

pub struct PeriodicScheduler {
    service: SyncService,
    cancellation_token: CancellationToken,
    ticker: Option<JoinHandle<()>>,
}

impl PeriodicScheduler {
    #[must_use]
    pub fn new(service: SyncService) -> Self {
        Self {
            service,
            cancellation_token: CancellationToken::new(),
            ticker: None,
        }
    }

    /// Start ticking at `period`. Each tick attempts to trigger a sync;
    /// the attempt is a no-op while a run is active.
    pub fn start(&mut self, period: Duration) {
        if self.ticker.is_some() {
            debug!("scheduler already started");
            return;
        }
        info!("starting periodic sync every {period:?}");

        let service = self.service.clone();
        let token = self.cancellation_token.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick fires immediately; the cadence should
            // begin one period from start.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("scheduler shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        if !service.trigger().await {
                            debug!("tick skipped, sync still running");
                        }
                    }
                }
            }
        }));
    }

    /// Cancel future ticks. The in-flight sync run, if any, keeps going;
    /// callers that need it finished await the service separately.
    pub async fn stop(&mut self) {
        self.cancellation_token.cancel();
        if let Some(handle) = self.ticker.take() {
            let _ = handle.await;
        }
        info!("periodic sync stopped");
    }
}
