//! Application layer - pipeline orchestration
//!
//! The sync task state machine, the dedup reconciler, the progress reporter
//! and the periodic scheduler. Everything here depends only on the domain
//! ports; concrete HTTP and SQLite implementations are injected.

pub mod reconciler;
pub mod reporter;
pub mod scheduler;
pub mod sync_task;

pub use reconciler::reconcile;
pub use reporter::ProgressReporter;
pub use scheduler::PeriodicScheduler;
pub use sync_task::{SyncOutcome, SyncService};
