//! In-process record store with spreadsheet row semantics.
//!
//! Rows are numbered from 2 (row 1 is the sheet header) and shift up after a
//! delete, exactly like deleting a spreadsheet row. Writes carrying the wrong
//! password are dropped silently, matching a remote endpoint whose response
//! the client cannot read.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use super::traits::{RecordStore, StoreError, StoreOperation};
use crate::domain::{LinkRecord, RawLinkRecord};
use crate::session::Credential;

/// First data row of the sheet.
pub const FIRST_ROW: u64 = 2;

/// A call observed by the store, for assertions in tests and demos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchAll,
    Append { identifier: String },
    Delete { row: u64 },
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<LinkRecord>,
    failing: HashSet<StoreOperation>,
    calls: Vec<StoreCall>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    password: Option<String>,
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// An empty store that accepts writes with any password.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `records`, in sheet order. Their rows are
    /// reassigned.
    pub fn with_records(records: Vec<LinkRecord>) -> Self {
        let store = Self::new();
        store.lock().rows = records;
        store
    }

    /// Only accept writes carrying this password.
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// Make an operation fail with a network error until cleared.
    pub fn set_failing(&self, operation: StoreOperation, failing: bool) {
        let mut state = self.lock();
        if failing {
            state.failing.insert(operation);
        } else {
            state.failing.remove(&operation);
        }
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Write calls (append and delete) received so far.
    pub fn write_calls(&self) -> Vec<StoreCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| !matches!(c, StoreCall::FetchAll))
            .cloned()
            .collect()
    }

    /// Current contents with their row numbers.
    pub fn records(&self) -> Vec<LinkRecord> {
        numbered(&self.lock().rows)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a test panicked mid-call; the data is
        // still consistent because every mutation is a single Vec operation.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn accepts(&self, credential: &Credential) -> bool {
        match &self.password {
            Some(expected) => expected == credential.expose(),
            None => true,
        }
    }
}

fn numbered(rows: &[LinkRecord]) -> Vec<LinkRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| r.clone().with_row(FIRST_ROW + i as u64))
        .collect()
}

fn injected_failure(operation: StoreOperation) -> StoreError {
    StoreError::Network {
        message: format!("injected {:?} failure", operation),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<RawLinkRecord>, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::FetchAll);
        if state.failing.contains(&StoreOperation::FetchAll) {
            return Err(injected_failure(StoreOperation::FetchAll));
        }
        Ok(numbered(&state.rows).iter().map(RawLinkRecord::from).collect())
    }

    async fn append(&self, credential: &Credential, record: &LinkRecord) -> Result<(), StoreError> {
        let accepted = self.accepts(credential);
        let mut state = self.lock();
        state.calls.push(StoreCall::Append {
            identifier: record.identifier.to_string(),
        });
        if state.failing.contains(&StoreOperation::Append) {
            return Err(injected_failure(StoreOperation::Append));
        }
        if accepted {
            let mut stored = record.clone();
            stored.row = None;
            state.rows.push(stored);
        } else {
            debug!("memory store dropped append with wrong password");
        }
        Ok(())
    }

    async fn delete(&self, credential: &Credential, row: u64) -> Result<(), StoreError> {
        let accepted = self.accepts(credential);
        let mut state = self.lock();
        state.calls.push(StoreCall::Delete { row });
        if state.failing.contains(&StoreOperation::Delete) {
            return Err(injected_failure(StoreOperation::Delete));
        }
        let index = row.checked_sub(FIRST_ROW).map(|i| i as usize);
        match index {
            Some(i) if accepted && i < state.rows.len() => {
                state.rows.remove(i);
            }
            _ => debug!(row, "memory store ignored delete"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LinkId;

    fn link(id: &str) -> LinkRecord {
        LinkRecord::new(LinkId::new(id), format!("https://{}.io", id), id, vec![], 1)
    }

    #[tokio::test]
    async fn rows_start_after_header_and_shift_on_delete() {
        let store = MemoryStore::with_records(vec![link("a"), link("b"), link("c")]);
        let credential = Credential::new("pw").unwrap();

        store.delete(&credential, 3).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier.as_str(), "a");
        assert_eq!(records[0].row, Some(2));
        assert_eq!(records[1].identifier.as_str(), "c");
        assert_eq!(records[1].row, Some(3));
    }

    #[tokio::test]
    async fn wrong_password_is_silently_dropped() {
        let store = MemoryStore::new().with_password("right");
        let wrong = Credential::new("wrong").unwrap();

        assert!(store.append(&wrong, &link("a")).await.is_ok());
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn injected_failures() {
        let store = MemoryStore::new();
        store.set_failing(StoreOperation::FetchAll, true);
        assert!(store.fetch_all().await.is_err());

        store.set_failing(StoreOperation::FetchAll, false);
        assert!(store.fetch_all().await.is_ok());
        assert_eq!(store.calls(), vec![StoreCall::FetchAll, StoreCall::FetchAll]);
    }

    #[tokio::test]
    async fn out_of_range_delete_is_ignored() {
        let store = MemoryStore::with_records(vec![link("a")]);
        let credential = Credential::new("pw").unwrap();
        store.delete(&credential, 0).await.unwrap();
        store.delete(&credential, 9).await.unwrap();
        assert_eq!(store.records().len(), 1);
    }
}
