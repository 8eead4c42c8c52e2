//! Spreadsheet-backed link API.
//!
//! - `GET <endpoint>?action=get` returns a JSON array of
//!   `{row, id, url, description, tags, timestamp}`.
//! - `POST <endpoint>` with `{action: "post", password, id, url, description, tags, timestamp}`
//!   appends a row; `{action: "delete", password, row}` deletes one.
//!
//! Writes are fire-and-forget: the endpoint's response is never inspected.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::traits::{RecordStore, StoreError};
use crate::config::ApiConfig;
use crate::domain::{LinkRecord, RawLinkRecord};
use crate::http::HttpClient;
use crate::session::Credential;

/// JSON body of a write request.
#[derive(Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum WriteRequest<'a> {
    Post {
        password: &'a str,
        id: &'a str,
        url: &'a str,
        description: &'a str,
        tags: String,
        timestamp: i64,
    },
    Delete {
        password: &'a str,
        row: u64,
    },
}

impl<'a> WriteRequest<'a> {
    pub fn post(credential: &'a Credential, record: &'a LinkRecord) -> Self {
        WriteRequest::Post {
            password: credential.expose(),
            id: record.identifier.as_str(),
            url: &record.url,
            description: &record.description,
            tags: record.tags_joined(),
            timestamp: record.created_at,
        }
    }

    pub fn delete(credential: &'a Credential, row: u64) -> Self {
        WriteRequest::Delete {
            password: credential.expose(),
            row,
        }
    }

    fn action(&self) -> &'static str {
        match self {
            WriteRequest::Post { .. } => "post",
            WriteRequest::Delete { .. } => "delete",
        }
    }
}

/// Decode the body of a `GET ?action=get` response.
pub fn decode_records(body: &str) -> Result<Vec<RawLinkRecord>, StoreError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| StoreError::Decode {
            message: format!("Invalid JSON: {}", e),
        })?;

    if !value.is_array() {
        return Err(StoreError::Decode {
            message: "Expected a JSON array of links".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| StoreError::Decode {
        message: format!("Unexpected link shape: {}", e),
    })
}

pub struct SheetStore {
    client: HttpClient,
    endpoint: Url,
}

impl SheetStore {
    pub fn new(endpoint: Url, client: HttpClient) -> Self {
        Self { client, endpoint }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, StoreError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| StoreError::Network {
            message: format!("Invalid endpoint {}: {}", config.endpoint, e),
        })?;
        let client = HttpClient::new(&config.user_agent, Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(endpoint, client))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, request: WriteRequest<'_>) -> Result<(), StoreError> {
        debug!(action = request.action(), "sending write request");
        self.client
            .post_json_opaque(self.endpoint.as_str(), &request)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SheetStore {
    async fn fetch_all(&self) -> Result<Vec<RawLinkRecord>, StoreError> {
        let response = self
            .client
            .get_with_params(self.endpoint.as_str(), &[("action", "get")])
            .await?;

        if !response.is_success() {
            return Err(StoreError::Status {
                status: response.status,
            });
        }

        let records = decode_records(&response.body)?;
        info!(count = records.len(), "fetched links from remote API");
        Ok(records)
    }

    async fn append(&self, credential: &Credential, record: &LinkRecord) -> Result<(), StoreError> {
        self.send(WriteRequest::post(credential, record)).await
    }

    async fn delete(&self, credential: &Credential, row: u64) -> Result<(), StoreError> {
        self.send(WriteRequest::delete(credential, row)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LinkId;

    #[test]
    fn post_body_shape() {
        let credential = Credential::new("pw").unwrap();
        let record = LinkRecord::new(
            LinkId::new("1700000000000"),
            "https://example.com",
            "Example",
            vec!["rust".to_string(), "blog".to_string()],
            1_700_000_000_000,
        );
        let body = serde_json::to_value(WriteRequest::post(&credential, &record)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "action": "post",
                "password": "pw",
                "id": "1700000000000",
                "url": "https://example.com",
                "description": "Example",
                "tags": "rust,blog",
                "timestamp": 1_700_000_000_000_i64
            })
        );
    }

    #[test]
    fn delete_body_shape() {
        let credential = Credential::new("pw").unwrap();
        let body = serde_json::to_value(WriteRequest::delete(&credential, 5)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"action": "delete", "password": "pw", "row": 5})
        );
    }

    #[test]
    fn decode_array() {
        let body = r#"[{"row": 2, "id": "1", "url": "https://a.io", "description": "A",
            "tags": "x,y", "timestamp": "1"}]"#;
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn decode_rejects_non_array() {
        assert!(matches!(
            decode_records(r#"{"error": "nope"}"#),
            Err(StoreError::Decode { .. })
        ));
        assert!(matches!(
            decode_records("<html>"),
            Err(StoreError::Decode { .. })
        ));
    }

    #[test]
    fn from_config_rejects_bad_endpoint() {
        let config = ApiConfig {
            endpoint: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(SheetStore::from_config(&config).is_err());
    }
}
