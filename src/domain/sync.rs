//! In-memory sync run state
//!
//! One `SyncRun` value describes one pipeline execution. It is created when
//! a run starts, mutated only by the sync task that owns it, and discarded
//! when the run reaches a terminal phase; observers only ever see snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Phase of a sync run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SyncPhase {
    Idle,
    Fetching,
    Reconciling,
    Persisting,
    Done,
    Failed,
}

impl SyncPhase {
    /// Done and Failed end the run; a new run starts fresh from Idle.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "Idle",
            Self::Fetching => "Fetching",
            Self::Reconciling => "Reconciling",
            Self::Persisting => "Persisting",
            Self::Done => "Done",
            Self::Failed => "Failed",
        };
        f.write_str(s)
    }
}

/// Snapshot of one pipeline execution, handed to the progress reporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncRun {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub phase: SyncPhase,
    /// 0-100, monotonically non-decreasing within the run.
    pub percent: u8,
    pub message: String,
}

impl SyncRun {
    #[must_use]
    pub fn started() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            phase: SyncPhase::Fetching,
            percent: 0,
            message: String::new(),
        }
    }

    /// Idle display state shown before any run has been triggered.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            run_id: String::new(),
            started_at: Utc::now(),
            phase: SyncPhase::Idle,
            percent: 0,
            message: "idle".to_string(),
        }
    }

    /// Move the run forward. Percent is clamped so it never decreases
    /// within a run, whatever the caller passes.
    pub fn advance(&mut self, phase: SyncPhase, percent: u8, message: impl Into<String>) {
        self.phase = phase;
        self.percent = self.percent.max(percent.min(100));
        self.message = message.into();
    }

    /// End the run in Failed with a human-readable cause.
    pub fn fail(&mut self, cause: impl Into<String>) {
        self.phase = SyncPhase::Failed;
        self.message = cause.into();
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}
