//! Backup export/import integration tests

mod common;

use common::fixtures::{fixture_path, load_backup_fixture, load_response_fixture};
use linkshelf_core::export::{export_repository, export_to_path, DEFAULT_BACKUP_FILE_NAME};
use linkshelf_core::import::{import_from_path, import_into, ImportError};
use linkshelf_core::query::{project, QueryState};
use linkshelf_core::repository::{LinkRepository, LoadStatus};
use linkshelf_core::store::decode_records;

fn loaded_repository() -> LinkRepository {
    let raw = decode_records(&load_response_fixture("links.json")).unwrap();
    let mut repository = LinkRepository::new();
    repository.install(Ok(raw)).unwrap();
    repository
}

#[test]
fn test_export_then_import_keeps_content() {
    let original = loaded_repository();
    let backup = export_repository(&original).unwrap();

    let mut restored = LinkRepository::new();
    let report = import_into(&mut restored, &backup).unwrap();

    assert_eq!(report.loaded, original.len());
    assert_eq!(report.shadowed, original.shadowed().len());
    for (before, after) in original.records().iter().zip(restored.records()) {
        assert_eq!(before.url, after.url);
        assert_eq!(before.description, after.description);
        assert_eq!(before.tags, after.tags);
        assert_eq!(before.identifier, after.identifier);
        assert_eq!(before.created_at, after.created_at);
    }
    assert_eq!(restored.status(), &LoadStatus::Imported { count: 4 });
}

#[test]
fn test_export_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_BACKUP_FILE_NAME);
    let original = loaded_repository();

    let written = export_to_path(&original, &path).unwrap();
    assert_eq!(written, 5);

    let mut restored = LinkRepository::new();
    import_from_path(&mut restored, &path).unwrap();
    assert_eq!(restored.all_records(), original.all_records());
}

#[test]
fn test_legacy_backup_with_joined_tags() {
    let mut repository = LinkRepository::new();
    import_into(&mut repository, &load_backup_fixture("legacy_backup.json")).unwrap();

    let news = &repository.records()[1];
    assert_eq!(news.tags, vec!["news", "tech"]);
    assert_eq!(news.row, None);

    let projection = project(repository.records(), &QueryState::new().with_term("docs"), 10);
    assert_eq!(projection.total_count, 1);
}

#[test]
fn test_import_of_non_array_leaves_repository_untouched() {
    let mut repository = loaded_repository();
    let err = import_into(&mut repository, r#"{"links": []}"#).unwrap_err();

    assert!(matches!(err, ImportError::NotAnArray));
    assert_eq!(repository.len(), 4);
    assert!(matches!(repository.status(), LoadStatus::Loaded { .. }));
}

#[test]
fn test_import_of_malformed_json() {
    let mut repository = LinkRepository::new();
    let err = import_into(&mut repository, "[{\"id\": ").unwrap_err();
    assert!(matches!(err, ImportError::InvalidJson { .. }));
    assert!(fixture_path("backups/legacy_backup.json").exists());
}
