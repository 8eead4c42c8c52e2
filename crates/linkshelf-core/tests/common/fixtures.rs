//! Test fixture loading utilities and record builders

#![allow(dead_code)]

use std::path::PathBuf;

use linkshelf_core::domain::{LinkId, LinkRecord};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load a mock API response fixture
pub fn load_response_fixture(name: &str) -> String {
    load_fixture(&format!("responses/{}", name))
}

/// Load a backup fixture
pub fn load_backup_fixture(name: &str) -> String {
    load_fixture(&format!("backups/{}", name))
}

/// A stored record numbered `n`: id `"n"`, created at `n`, row `n + 1`.
pub fn link(n: i64) -> LinkRecord {
    LinkRecord::new(
        LinkId::new(n.to_string()),
        format!("https://site{}.example.com", n),
        format!("Link number {}", n),
        vec![],
        n,
    )
    .with_row(n as u64 + 1)
}

/// `count` records created at 1..=count, in creation order.
pub fn links(count: i64) -> Vec<LinkRecord> {
    (1..=count).map(link).collect()
}

/// A record with explicit fields and no row.
pub fn record(id: &str, url: &str, description: &str, tags: &[&str], created_at: i64) -> LinkRecord {
    LinkRecord::new(
        LinkId::new(id),
        url,
        description,
        tags.iter().map(|t| t.to_string()).collect(),
        created_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path() {
        let path = fixture_path("responses/links.json");
        assert!(path.to_string_lossy().contains("test_fixtures"));
    }

    #[test]
    fn test_links_builder() {
        let records = links(3);
        assert_eq!(records[2].identifier.as_str(), "3");
        assert_eq!(records[2].row, Some(4));
    }
}
