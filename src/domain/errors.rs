//! Error taxonomy for the sync pipeline
//!
//! Fetch failures abort a run; store failures are judged per record by the
//! sync task (a conflict or a single bad row does not abort the run).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified failure of the remote collection fetch
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FetchError {
    #[error("Remote source unreachable: {0}")]
    Unreachable(String),

    #[error("Remote source returned status {0}")]
    BadStatus(u16),

    #[error("Fetch timed out")]
    Timeout,

    #[error("Remote payload could not be decoded: {0}")]
    Malformed(String),
}

/// Failure of a persistent store operation
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum StoreError {
    /// A row with this id is already present. The reconciler should have
    /// filtered it; hitting this indicates a lost race, not a fatal error.
    #[error("Record {id} already present in store")]
    Conflict { id: i64 },

    #[error("Storage failure: {0}")]
    Io(String),
}
