//! Backup import.
//!
//! Imported records replace the repository for local viewing only; nothing
//! is pushed to the remote store. Tags may be an array or a comma-joined
//! string, so backups from older exports load too.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::RawLinkRecord;
use crate::repository::{LinkRepository, LoadReport};

/// Message shown when a backup cannot be read.
pub const IMPORT_FAILED_MESSAGE: &str = "Import failed! Please ensure the data is valid JSON.";

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
    #[error("Invalid format: expected a JSON array of links")]
    NotAnArray,
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a backup document.
pub fn parse_backup(content: &str) -> Result<Vec<RawLinkRecord>, ImportError> {
    if content.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| ImportError::InvalidJson {
            message: e.to_string(),
        })?;

    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }

    serde_json::from_value(value).map_err(|e| ImportError::InvalidJson {
        message: e.to_string(),
    })
}

/// Replace the repository with a backup. On error the repository is left
/// untouched.
pub fn import_into(repository: &mut LinkRepository, content: &str) -> Result<LoadReport, ImportError> {
    let raw = parse_backup(content).map_err(|e| {
        warn!(error = %e, "backup import rejected");
        e
    })?;
    let report = repository.apply_import(raw);
    info!(loaded = report.loaded, shadowed = report.shadowed, "backup imported");
    Ok(report)
}

/// Read a backup file and replace the repository with it.
pub fn import_from_path(repository: &mut LinkRepository, path: &Path) -> Result<LoadReport, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    import_into(repository, &content)
}

pub fn import_summary(count: usize) -> String {
    format!("Successfully imported {} links for local viewing.", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinkId, LinkRecord};
    use crate::repository::LoadStatus;
    use rstest::rstest;

    #[rstest]
    #[case("", "EmptyInput")]
    #[case("   \n", "EmptyInput")]
    #[case("{not json", "InvalidJson")]
    #[case(r#"{"links": []}"#, "NotAnArray")]
    #[case("42", "NotAnArray")]
    #[case(r#"[{"id": {"nested": true}}]"#, "InvalidJson")]
    fn rejects_bad_backups(#[case] content: &str, #[case] expected: &str) {
        let err = parse_backup(content).unwrap_err();
        let kind = match err {
            ImportError::EmptyInput => "EmptyInput",
            ImportError::InvalidJson { .. } => "InvalidJson",
            ImportError::NotAnArray => "NotAnArray",
            ImportError::Io { .. } => "Io",
        };
        assert_eq!(kind, expected);
    }

    #[test]
    fn failed_import_leaves_repository_untouched() {
        let mut repository = LinkRepository::with_records(vec![LinkRecord::new(
            LinkId::new("keep"),
            "https://a.io",
            "A",
            vec![],
            1,
        )]);

        assert!(import_into(&mut repository, "{}").is_err());
        assert_eq!(repository.len(), 1);
        assert!(matches!(repository.status(), LoadStatus::Loaded { .. }));
    }

    #[test]
    fn accepts_joined_and_array_tags() {
        let content = r#"[
            {"row": 2, "id": "1", "url": "https://a.io", "description": "A", "tags": ["X", "y"], "timestamp": 1},
            {"id": "2", "url": "https://b.io", "description": "B", "tags": "p, Q", "timestamp": "2"}
        ]"#;
        let mut repository = LinkRepository::new();
        let report = import_into(&mut repository, content).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(repository.records()[0].tags, vec!["x", "y"]);
        assert_eq!(repository.records()[1].tags, vec!["p", "q"]);
        assert_eq!(repository.records()[1].row, None);
        assert_eq!(import_summary(2), "Successfully imported 2 links for local viewing.");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut repository = LinkRepository::new();
        let err = import_from_path(&mut repository, &dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
