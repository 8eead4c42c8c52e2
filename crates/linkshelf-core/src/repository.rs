//! In-memory mirror of the remote link collection.
//!
//! The repository holds the last snapshot and nothing else: every load
//! replaces it wholesale, there is no incremental patching. A failed load
//! leaves it empty and flagged so the view can say why nothing is shown.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{LinkId, LinkRecord, RawLinkRecord};
use crate::store::{RecordStore, StoreError};
use linkshelf_tags::TagIndex;

/// Repository shared between the view and the mutation coordinator.
pub type SharedRepository = Arc<RwLock<LinkRepository>>;

/// Where the current snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loaded {
        at: DateTime<Utc>,
        count: usize,
    },
    /// Replaced from a backup file; local only.
    Imported {
        count: usize,
    },
    Failed {
        message: String,
    },
}

impl LoadStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed { .. })
    }
}

/// Outcome of replacing the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Records now visible in the repository
    pub loaded: usize,
    /// Records hidden because an earlier record had the same identifier
    pub shadowed: usize,
}

#[derive(Debug, Default)]
pub struct LinkRepository {
    records: Vec<LinkRecord>,
    shadowed: Vec<LinkRecord>,
    status: LoadStatus,
}

impl LinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository holding `records` as if freshly loaded.
    pub fn with_records(records: Vec<LinkRecord>) -> Self {
        let mut repository = Self::new();
        let (records, shadowed) = dedupe(records);
        repository.status = LoadStatus::Loaded {
            at: Utc::now(),
            count: records.len(),
        };
        repository.records = records;
        repository.shadowed = shadowed;
        repository
    }

    pub fn into_shared(self) -> SharedRepository {
        Arc::new(RwLock::new(self))
    }

    /// Fetch from `store` and replace the snapshot.
    pub async fn load(&mut self, store: &dyn RecordStore) -> Result<LoadReport, StoreError> {
        let fetched = store.fetch_all().await;
        self.install(fetched)
    }

    /// Replace the snapshot with a fetch result.
    ///
    /// On error the repository is emptied, flagged as failed, and the error
    /// is handed back for reporting.
    pub fn install(
        &mut self,
        fetched: Result<Vec<RawLinkRecord>, StoreError>,
    ) -> Result<LoadReport, StoreError> {
        match fetched {
            Ok(raw) => {
                let report = self.replace(raw);
                self.status = LoadStatus::Loaded {
                    at: Utc::now(),
                    count: report.loaded,
                };
                info!(loaded = report.loaded, shadowed = report.shadowed, "link snapshot loaded");
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "link load failed; repository cleared");
                self.records.clear();
                self.shadowed.clear();
                self.status = LoadStatus::Failed {
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Replace the snapshot with records from a backup. Nothing is sent to
    /// the remote store.
    pub fn apply_import(&mut self, raw: Vec<RawLinkRecord>) -> LoadReport {
        let report = self.replace(raw);
        self.status = LoadStatus::Imported {
            count: report.loaded,
        };
        info!(loaded = report.loaded, "link snapshot imported for local viewing");
        report
    }

    fn replace(&mut self, raw: Vec<RawLinkRecord>) -> LoadReport {
        let normalized: Vec<LinkRecord> = raw
            .into_iter()
            .enumerate()
            .map(|(position, r)| r.into_record(position))
            .collect();
        let (records, shadowed) = dedupe(normalized);
        for dup in &shadowed {
            warn!(identifier = %dup.identifier, row = ?dup.row, "duplicate link identifier shadowed");
        }
        let report = LoadReport {
            loaded: records.len(),
            shadowed: shadowed.len(),
        };
        self.records = records;
        self.shadowed = shadowed;
        report
    }

    /// Visible records in snapshot order.
    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    /// Records hidden behind an earlier record with the same identifier.
    pub fn shadowed(&self) -> &[LinkRecord] {
        &self.shadowed
    }

    /// Every record of the snapshot, visible ones first.
    pub fn all_records(&self) -> Vec<LinkRecord> {
        self.records.iter().chain(self.shadowed.iter()).cloned().collect()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record (visible or shadowed) by its row handle.
    pub fn find_by_row(&self, row: u64) -> Option<&LinkRecord> {
        self.records
            .iter()
            .chain(self.shadowed.iter())
            .find(|r| r.row == Some(row))
    }

    pub fn find_by_id(&self, identifier: &LinkId) -> Option<&LinkRecord> {
        self.records.iter().find(|r| &r.identifier == identifier)
    }

    /// Tag usage across visible records.
    pub fn tag_index(&self) -> TagIndex {
        TagIndex::from_tag_lists(self.records.iter().map(|r| r.tags.as_slice()))
    }
}

/// Fetch outside the lock, then swap the snapshot under a write lock.
pub async fn refresh(
    repository: &RwLock<LinkRepository>,
    store: &dyn RecordStore,
) -> Result<LoadReport, StoreError> {
    let fetched = store.fetch_all().await;
    repository.write().await.install(fetched)
}

fn dedupe(records: Vec<LinkRecord>) -> (Vec<LinkRecord>, Vec<LinkRecord>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());
    let mut shadowed = Vec::new();
    for record in records {
        if seen.insert(record.identifier.clone()) {
            kept.push(record);
        } else {
            shadowed.push(record);
        }
    }
    (kept, shadowed)
}
