//! SQLite implementation of the record store
//!
//! Insert-only repository over a sqlx pool. A unique-key violation is
//! surfaced as [`StoreError::Conflict`] so the sync task can treat it as a
//! lost race rather than a storage failure.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::errors::StoreError;
use crate::domain::record::Record;
use crate::domain::repositories::RecordRepository;

#[derive(Clone)]
pub struct SqliteRecordRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    fn map_insert_error(record_id: i64, e: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return StoreError::Conflict { id: record_id };
            }
        }
        StoreError::Io(e.to_string())
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let row = sqlx::query_scalar::<_, i64>("SELECT 1 FROM records WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(row.is_some())
    }

    async fn insert(&self, record: &Record) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO records (id, owner_id, title, body, synced_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id)
        .bind(record.owner_id)
        .bind(&record.title)
        .bind(&record.body)
        .bind(record.synced_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| Self::map_insert_error(record.id, e))?;
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Record>, StoreError> {
        sqlx::query_as::<_, Record>(
            "SELECT id, owner_id, title, body, synced_at FROM records ORDER BY id",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(count as u64)
    }
}
