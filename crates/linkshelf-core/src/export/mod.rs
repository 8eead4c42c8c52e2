//! Backup export.
//!
//! A backup is a pretty-printed JSON array of every loaded record with its
//! internal fields, tags as an array:
//!
//! ```json
//! [
//!   {
//!     "row": 2,
//!     "id": "1718000000000",
//!     "url": "https://example.com",
//!     "description": "Example",
//!     "tags": ["rust", "blog"],
//!     "timestamp": 1718000000000
//!   }
//! ]
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::domain::LinkRecord;
use crate::repository::LinkRepository;

/// File name offered for exports.
pub const DEFAULT_BACKUP_FILE_NAME: &str = "link_organizer_backup.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not serialize backup: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize records as a backup document.
pub fn export_json(records: &[LinkRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Serialize every record in the repository, shadowed duplicates included.
pub fn export_repository(repository: &LinkRepository) -> Result<String, ExportError> {
    export_json(&repository.all_records())
}

/// Write the repository's backup to `path` and return the record count.
pub fn export_to_path(repository: &LinkRepository, path: &Path) -> Result<usize, ExportError> {
    let records = repository.all_records();
    let json = export_json(&records)?;
    std::fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(count = records.len(), path = %path.display(), "backup exported");
    Ok(records.len())
}

pub fn export_summary(count: usize) -> String {
    format!("Successfully exported {} links.", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LinkId;

    #[test]
    fn pretty_printed_with_tag_arrays() {
        let records = vec![LinkRecord::new(
            LinkId::new("1"),
            "https://a.io",
            "A",
            vec!["x".to_string()],
            1,
        )
        .with_row(2)];
        let json = export_json(&records).unwrap();
        assert!(json.starts_with("[\n  {\n    \"row\": 2,"));
        assert!(json.contains("\"tags\": [\n      \"x\"\n    ]"));
    }

    #[test]
    fn empty_repository_exports_empty_array() {
        let json = export_repository(&LinkRepository::new()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_BACKUP_FILE_NAME);
        let repository = LinkRepository::with_records(vec![LinkRecord::new(
            LinkId::new("1"),
            "https://a.io",
            "A",
            vec![],
            1,
        )]);

        assert_eq!(export_to_path(&repository, &path).unwrap(), 1);
        assert!(std::fs::read_to_string(&path).unwrap().contains("https://a.io"));
        assert_eq!(export_summary(1), "Successfully exported 1 links.");
    }
}
