use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record as synced from the remote collection.
///
/// `id` is the natural key assigned by the remote source; rows are immutable
/// once stored (the pipeline never updates or deletes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    #[serde(rename = "ownerId")]
    pub owner_id: i64,
    pub title: String,
    pub body: String,
    #[serde(rename = "syncedAt")]
    pub synced_at: DateTime<Utc>,
}

impl Record {
    pub fn new(id: i64, owner_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            title: title.into(),
            body: body.into(),
            synced_at: Utc::now(),
        }
    }
}
