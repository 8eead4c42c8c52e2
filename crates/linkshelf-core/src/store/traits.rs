//! The record store contract

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{LinkRecord, RawLinkRecord};
use crate::http::HttpError;
use crate::session::Credential;

/// Errors from a record store.
///
/// Writes can only fail with [`StoreError::Network`]: the store never reports
/// whether the remote side accepted a write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Network error: {message}")]
    Network { message: String },
    #[error("Remote API returned status {status}")]
    Status { status: u16 },
    #[error("Could not decode remote response: {message}")]
    Decode { message: String },
}

impl From<HttpError> for StoreError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::ParseError { message } => StoreError::Decode { message },
            other => StoreError::Network {
                message: other.to_string(),
            },
        }
    }
}

/// Operations a record store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    FetchAll,
    Append,
    Delete,
}

/// Gateway to the backing store of links.
///
/// There is no update operation; see the mutation coordinator for how an
/// update is emulated.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record currently stored.
    async fn fetch_all(&self) -> Result<Vec<RawLinkRecord>, StoreError>;

    /// Append a record. `Ok(())` only means the request went out.
    async fn append(&self, credential: &Credential, record: &LinkRecord) -> Result<(), StoreError>;

    /// Delete the record at `row`. `Ok(())` only means the request went out.
    async fn delete(&self, credential: &Credential, row: u64) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_map_to_store_errors() {
        let err: StoreError = HttpError::Timeout.into();
        assert!(matches!(err, StoreError::Network { .. }));

        let err: StoreError = HttpError::ParseError {
            message: "bad utf-8".into(),
        }
        .into();
        assert_eq!(
            err,
            StoreError::Decode {
                message: "bad utf-8".into()
            }
        );
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::Status { status: 500 };
        assert!(err.to_string().contains("500"));
    }
}
