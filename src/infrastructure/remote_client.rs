//! HTTP client for the remote record collection
//!
//! Issues a single GET of the collection endpoint with a bounded timeout
//! and classifies failures; retry policy belongs to the sync task.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::FetchError;
use crate::domain::record::Record;
use crate::domain::services::RemoteSource;

/// Remote client configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RemoteClientConfig {
    pub endpoint_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for RemoteClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: crate::infrastructure::config::remote::POSTS_URL.to_string(),
            timeout_seconds: 30,
            user_agent: "post-sync/0.2".to_string(),
        }
    }
}

/// Wire shape of one collection element as served by the endpoint.
#[derive(Debug, Deserialize)]
struct RemotePost {
    id: i64,
    #[serde(rename = "userId")]
    user_id: i64,
    title: String,
    body: String,
}

impl From<RemotePost> for Record {
    fn from(post: RemotePost) -> Self {
        Record::new(post.id, post.user_id, post.title, post.body)
    }
}

/// Reqwest-backed implementation of the remote source port.
pub struct HttpRemoteSource {
    client: Client,
    config: RemoteClientConfig,
}

impl HttpRemoteSource {
    pub fn new(config: RemoteClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn classify(e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::BadStatus(status.as_u16())
        } else {
            FetchError::Unreachable(e.to_string())
        }
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        debug!(url = %self.config.endpoint_url, "fetching record collection");

        let response = self
            .client
            .get(&self.config.endpoint_url)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let posts: Vec<RemotePost> = response.json().await.map_err(Self::classify)?;
        debug!("fetched {} records", posts.len());
        Ok(posts.into_iter().map(Record::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_payload_decodes_with_remote_field_names() {
        let payload = r#"[
            {"userId": 1, "id": 1, "title": "A", "body": "x"},
            {"userId": 2, "id": 2, "title": "B", "body": "y"}
        ]"#;
        let posts: Vec<RemotePost> = serde_json::from_str(payload).unwrap();
        let records: Vec<Record> = posts.into_iter().map(Record::from).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].owner_id, 1);
        assert_eq!(records[1].title, "B");
    }

    #[test]
    fn default_config_points_at_the_posts_collection() {
        let config = RemoteClientConfig::default();
        assert!(config.endpoint_url.ends_with("/posts"));
        assert_eq!(config.timeout_seconds, 30);
    }

    #[tokio::test]
    async fn unreachable_host_is_classified() {
        let source = HttpRemoteSource::new(RemoteClientConfig {
            // Port 1 on loopback is closed; the connect is refused
            // immediately, no packet leaves the host.
            endpoint_url: "http://127.0.0.1:1/posts".to_string(),
            timeout_seconds: 1,
            ..RemoteClientConfig::default()
        })
        .unwrap();

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(_)));
    }
}
