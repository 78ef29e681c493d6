//! post-sync - Periodic record synchronization pipeline
//!
//! Fetches a record collection from a remote source, reconciles it against
//! a local SQLite store with an idempotent insert-only rule, and reports
//! progress to an observing surface while a periodic scheduler drives runs
//! without overlap.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

// Re-export the pipeline surface for easier access
pub use application::reporter::ProgressReporter;
pub use application::scheduler::PeriodicScheduler;
pub use application::sync_task::SyncService;
pub use domain::sync::{SyncPhase, SyncRun};
