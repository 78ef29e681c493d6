//! Infrastructure layer for database access, HTTP fetch, configuration
//! and logging

pub mod config;
pub mod database_connection;
pub mod logging;
pub mod record_repository;
pub mod remote_client;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager};
pub use database_connection::DatabaseConnection;
pub use record_repository::SqliteRecordRepository;
pub use remote_client::{HttpRemoteSource, RemoteClientConfig};
