//! Dedup reconciler
//!
//! Selects the subset of a fetched batch that is not yet in the store, so
//! the persisting phase only ever issues inserts for previously-unseen ids.

use std::collections::HashSet;

use crate::domain::errors::StoreError;
use crate::domain::record::Record;
use crate::domain::repositories::RecordRepository;

/// Filter `batch` down to the records whose id is not already stored,
/// preserving the batch's relative order.
///
/// A repeated id within the same batch is kept only at its first
/// occurrence (stable in-batch dedup, in addition to the store check).
/// Pure over its inputs aside from the store reads.
pub async fn reconcile(
    batch: &[Record],
    store: &dyn RecordRepository,
) -> Result<Vec<Record>, StoreError> {
    let mut seen: HashSet<i64> = HashSet::with_capacity(batch.len());
    let mut selected = Vec::new();

    for record in batch {
        if !seen.insert(record.id) {
            continue;
        }
        if !store.exists(record.id).await? {
            selected.push(record.clone());
        }
    }

    Ok(selected)
}
