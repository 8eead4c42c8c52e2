//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ValidationError;
use crate::export::ExportError;
use crate::import::ImportError;
use crate::mutation::MutationError;
use crate::session::SessionError;
use crate::store::StoreError;

/// Any error linkshelf-core can return.
#[derive(Error, Debug)]
pub enum LinkshelfError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LinkshelfError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_with_store_error() -> Result<()> {
        Err(StoreError::Status { status: 404 })?
    }

    #[test]
    fn conversions_keep_messages() {
        let err = fails_with_store_error().unwrap_err();
        assert!(matches!(err, LinkshelfError::Store(_)));
        assert_eq!(err.to_string(), "Remote API returned status 404");

        let err: LinkshelfError = MutationError::OwnerRequired.into();
        assert_eq!(err.to_string(), "Owner login required");
    }
}
