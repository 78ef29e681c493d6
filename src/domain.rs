//! Domain module - Core entities and ports of the sync pipeline
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod errors;
pub mod record;
pub mod repositories;
pub mod services;
pub mod sync;

// Re-export commonly used items
pub use errors::{FetchError, StoreError};
pub use record::Record;
pub use repositories::RecordRepository;
pub use services::RemoteSource;
pub use sync::{SyncPhase, SyncRun};
