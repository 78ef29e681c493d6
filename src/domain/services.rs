//! Domain service traits implemented by the infrastructure layer

use async_trait::async_trait;

use crate::domain::errors::FetchError;
use crate::domain::record::Record;

/// Remote collection endpoint serving the records to sync.
///
/// One call issues one network exchange; retry policy belongs to the caller.
/// Implementations must bound their wait and resolve to
/// [`FetchError::Timeout`] rather than suspending indefinitely.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Record>, FetchError>;
}
