//! Repository interfaces for the record store
//!
//! Contains trait definitions for data access; implementations live in the
//! infrastructure layer.

use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::record::Record;

/// Persistent record store keyed by the remote-assigned `id`.
///
/// Sync only checks existence and inserts; there is no update or delete path.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Point lookup with no side effect.
    async fn exists(&self, id: i64) -> Result<bool, StoreError>;

    /// Insert a record, failing with [`StoreError::Conflict`] if the id is
    /// already present.
    async fn insert(&self, record: &Record) -> Result<(), StoreError>;

    /// Fresh snapshot of all stored records ordered by id. Each call
    /// re-reads the store; the result is not a live view.
    async fn scan(&self) -> Result<Vec<Record>, StoreError>;

    /// Number of stored records.
    async fn count(&self) -> Result<u64, StoreError>;
}
