//! Create, update and remove links against the record store.
//!
//! [`MutationCoordinator`] owns the edit state machine:
//!
//! ```text
//!            begin_edit(row)
//!   Create ------------------> Update{row, createdAt, id}
//!     ^                             |
//!     +--- submit ok / cancel ------+
//!     +--- aborted after a call ----+
//! ```
//!
//! Every successful mutation schedules a delayed full reload of the
//! repository; row handles are stale until it completes. While a mutation or
//! its reload is pending, further mutations and new stagings are refused
//! with [`MutationError::Busy`]. A staged row is checked against the current
//! repository before its delete is issued; if it no longer names the staged
//! link the change fails with [`MutationError::StaleRow`].

mod draft;
mod plan;

pub use draft::*;
pub use plan::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::{Clock, IdGenerator, SystemClock};
use crate::config::SyncConfig;
use crate::domain::{LinkId, LinkRecord, ValidationError};
use crate::repository::{refresh, LoadReport, SharedRepository};
use crate::store::{RecordStore, StoreError};
use crate::session::Credential;

/// Confirmation shown before a removal is issued.
pub const REMOVAL_PROMPT: &str =
    "Are you sure you want to remove this link? This action is permanent.";

#[derive(Error, Debug)]
pub enum MutationError {
    #[error("Owner login required")]
    OwnerRequired,
    #[error("Another change is still being synchronized; try again shortly")]
    Busy,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No link at row {row}")]
    UnknownRow { row: u64 },
    #[error("Link {identifier} has no row in the remote store; reload before changing it")]
    MissingRow { identifier: LinkId },
    #[error("Row {row} no longer holds the staged link; reload and try again")]
    StaleRow { row: u64 },
    #[error("Aborted at '{failed}' after {} completed step(s): {source}", .completed.len())]
    Aborted {
        completed: Vec<MutationStep>,
        failed: MutationStep,
        source: StoreError,
    },
    #[error("Reload after change failed: {0}")]
    Reload(#[source] StoreError),
    #[error("Reload task did not complete: {message}")]
    ReloadTask { message: String },
}

/// The staged edit, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditContext {
    pub target_row: u64,
    pub preserved_created_at: i64,
    pub identifier: LinkId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Create,
    Update(EditContext),
}

impl EditMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Update(_))
    }
}

/// Timing and identity policy for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationSettings {
    pub reload_after_submit: Duration,
    pub reload_after_remove: Duration,
    pub preserve_identifier_on_update: bool,
}

impl Default for MutationSettings {
    fn default() -> Self {
        Self::from(&SyncConfig::default())
    }
}

impl From<&SyncConfig> for MutationSettings {
    fn from(config: &SyncConfig) -> Self {
        Self {
            reload_after_submit: config.reload_after_submit(),
            reload_after_remove: config.reload_after_remove(),
            preserve_identifier_on_update: config.preserve_identifier_on_update,
        }
    }
}

/// A removal awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    pub row: u64,
    pub record: LinkRecord,
}

impl PendingRemoval {
    pub fn prompt(&self) -> &'static str {
        REMOVAL_PROMPT
    }
}

/// The scheduled reload following a mutation.
///
/// Dropping the handle does not cancel the reload.
#[derive(Debug)]
pub struct PendingReload {
    handle: JoinHandle<Result<LoadReport, StoreError>>,
}

impl PendingReload {
    /// Wait for the reload to run.
    pub async fn wait(self) -> Result<LoadReport, MutationError> {
        self.handle
            .await
            .map_err(|e| MutationError::ReloadTask {
                message: e.to_string(),
            })?
            .map_err(MutationError::Reload)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Result of a successful mutation.
#[derive(Debug)]
pub struct MutationOutcome {
    pub plan: MutationPlan,
    pub reload: PendingReload,
}

impl MutationOutcome {
    /// The record written, for create and update.
    pub fn record(&self) -> Option<&LinkRecord> {
        self.plan.inserted()
    }
}

/// Holds the in-flight flag until dropped.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct MutationCoordinator {
    store: Arc<dyn RecordStore>,
    repository: SharedRepository,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    settings: MutationSettings,
    mode: EditMode,
    in_flight: Arc<AtomicBool>,
}

impl MutationCoordinator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        repository: SharedRepository,
        settings: MutationSettings,
    ) -> Self {
        Self {
            store,
            repository,
            clock: Arc::new(SystemClock),
            ids: IdGenerator::new(),
            settings,
            mode: EditMode::Create,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn settings(&self) -> &MutationSettings {
        &self.settings
    }

    /// Whether a mutation or its reload is still pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Stage the link at `row` for editing and return its current values.
    pub async fn begin_edit(&mut self, row: u64) -> Result<LinkDraft, MutationError> {
        self.ensure_idle()?;
        let record = {
            let repository = self.repository.read().await;
            repository
                .find_by_row(row)
                .cloned()
                .ok_or(MutationError::UnknownRow { row })?
        };
        self.begin_edit_record(&record)
    }

    /// Stage `record` for editing.
    pub fn begin_edit_record(&mut self, record: &LinkRecord) -> Result<LinkDraft, MutationError> {
        self.ensure_idle()?;
        let target_row = record.row.ok_or_else(|| MutationError::MissingRow {
            identifier: record.identifier.clone(),
        })?;
        debug!(row = target_row, identifier = %record.identifier, "edit staged");
        self.mode = EditMode::Update(EditContext {
            target_row,
            preserved_created_at: record.created_at,
            identifier: record.identifier.clone(),
        });
        Ok(LinkDraft::from_record(record))
    }

    /// Drop any staged edit and return to create mode.
    pub fn cancel_edit(&mut self) {
        self.mode = EditMode::Create;
    }

    /// Create a link, or update the staged one.
    ///
    /// Checks run in order: URL validation, owner credential, in-flight
    /// guard, staged row still current. None of them touch the store.
    pub async fn submit(
        &mut self,
        credential: Option<&Credential>,
        draft: &LinkDraft,
    ) -> Result<MutationOutcome, MutationError> {
        let prepared = draft.prepare()?;
        let credential = credential.ok_or(MutationError::OwnerRequired)?;
        let guard = InFlightGuard::acquire(&self.in_flight).ok_or(MutationError::Busy)?;

        if let EditMode::Update(context) = &self.mode {
            let (row, identifier) = (context.target_row, context.identifier.clone());
            if let Err(e) = self.verify_row(row, &identifier).await {
                self.mode = EditMode::Create;
                return Err(e);
            }
        }

        let plan = self.plan_submit(prepared);
        if let Err(e) = plan.execute(self.store.as_ref(), credential).await {
            warn!(plan = plan.kind(), error = %e, "mutation aborted");
            self.mode = EditMode::Create;
            return Err(e);
        }

        self.mode = EditMode::Create;
        if let Some(record) = plan.inserted() {
            info!(plan = plan.kind(), identifier = %record.identifier, "link saved");
        }
        let reload = self.schedule_reload(self.settings.reload_after_submit, guard);
        Ok(MutationOutcome { plan, reload })
    }

    fn plan_submit(&mut self, prepared: PreparedLink) -> MutationPlan {
        let now = self.clock.now_millis();
        match &self.mode {
            EditMode::Create => MutationPlan::Create {
                insert: LinkRecord::new(
                    self.ids.next(now),
                    prepared.url,
                    prepared.description,
                    prepared.tags,
                    now,
                ),
            },
            EditMode::Update(context) => {
                let identifier = if self.settings.preserve_identifier_on_update {
                    context.identifier.clone()
                } else {
                    self.ids.next(now)
                };
                MutationPlan::Update {
                    delete_row: context.target_row,
                    insert: LinkRecord::new(
                        identifier,
                        prepared.url,
                        prepared.description,
                        prepared.tags,
                        context.preserved_created_at,
                    ),
                }
            }
        }
    }

    /// Look up the link at `row` and describe what removing it would do.
    /// Nothing is sent until [`confirm_removal`](Self::confirm_removal).
    pub async fn prepare_removal(&self, row: u64) -> Result<PendingRemoval, MutationError> {
        self.ensure_idle()?;
        let repository = self.repository.read().await;
        let record = repository
            .find_by_row(row)
            .cloned()
            .ok_or(MutationError::UnknownRow { row })?;
        Ok(PendingRemoval { row, record })
    }

    /// Issue the delete for a confirmed removal.
    pub async fn confirm_removal(
        &mut self,
        credential: Option<&Credential>,
        pending: PendingRemoval,
    ) -> Result<MutationOutcome, MutationError> {
        let credential = credential.ok_or(MutationError::OwnerRequired)?;
        let guard = InFlightGuard::acquire(&self.in_flight).ok_or(MutationError::Busy)?;

        // Rows shift after the delete, so a staged edit would target the
        // wrong link.
        self.mode = EditMode::Create;
        self.verify_row(pending.row, &pending.record.identifier).await?;

        let plan = MutationPlan::Remove { row: pending.row };
        if let Err(e) = plan.execute(self.store.as_ref(), credential).await {
            warn!(row = pending.row, error = %e, "removal aborted");
            return Err(e);
        }

        info!(row = pending.row, identifier = %pending.record.identifier, "link removed");
        let reload = self.schedule_reload(self.settings.reload_after_remove, guard);
        Ok(MutationOutcome { plan, reload })
    }

    fn ensure_idle(&self) -> Result<(), MutationError> {
        if self.is_busy() {
            return Err(MutationError::Busy);
        }
        Ok(())
    }

    /// Row handles shift after every write; make sure `row` still holds
    /// `identifier` in the current snapshot.
    async fn verify_row(&self, row: u64, identifier: &LinkId) -> Result<(), MutationError> {
        let repository = self.repository.read().await;
        match repository.find_by_row(row) {
            Some(record) if &record.identifier == identifier => Ok(()),
            _ => {
                warn!(row, identifier = %identifier, "staged row is stale");
                Err(MutationError::StaleRow { row })
            }
        }
    }

    fn schedule_reload(&self, delay: Duration, guard: InFlightGuard) -> PendingReload {
        let store = Arc::clone(&self.store);
        let repository = Arc::clone(&self.repository);
        debug!(delay_ms = delay.as_millis() as u64, "reload scheduled");
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let result = refresh(&repository, store.as_ref()).await;
            drop(guard);
            result
        });
        PendingReload { handle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::LinkId;
    use crate::repository::LinkRepository;
    use crate::store::MemoryStore;

    fn instant() -> MutationSettings {
        MutationSettings {
            reload_after_submit: Duration::ZERO,
            reload_after_remove: Duration::ZERO,
            preserve_identifier_on_update: true,
        }
    }

    fn coordinator(store: Arc<MemoryStore>) -> MutationCoordinator {
        let repository = LinkRepository::new().into_shared();
        MutationCoordinator::new(store, repository, instant())
            .with_clock(Arc::new(ManualClock::new(1_000)))
    }

    #[test]
    fn guard_is_exclusive() {
        let flag = Arc::new(AtomicBool::new(false));
        let first = InFlightGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());
        drop(first);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn create_assigns_clock_identifier() {
        let store = Arc::new(MemoryStore::new());
        let mut coordinator = coordinator(Arc::clone(&store));
        let credential = Credential::new("pw").unwrap();

        let outcome = coordinator
            .submit(Some(&credential), &LinkDraft::new("https://a.io"))
            .await
            .unwrap();
        let record = outcome.record().unwrap().clone();
        outcome.reload.wait().await.unwrap();

        assert_eq!(record.identifier, LinkId::new("1000"));
        assert_eq!(record.created_at, 1_000);
        assert_eq!(record.description, "No description");
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn validation_precedes_owner_check() {
        let store = Arc::new(MemoryStore::new());
        let mut coordinator = coordinator(Arc::clone(&store));

        let err = coordinator
            .submit(None, &LinkDraft::new("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, MutationError::Validation(_)));

        let err = coordinator
            .submit(None, &LinkDraft::new("https://a.io"))
            .await
            .unwrap_err();
        assert!(matches!(err, MutationError::OwnerRequired));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_row_cannot_be_edited() {
        let store = Arc::new(MemoryStore::new());
        let mut coordinator = coordinator(store);
        assert!(matches!(
            coordinator.begin_edit(5).await,
            Err(MutationError::UnknownRow { row: 5 })
        ));
        assert_eq!(coordinator.mode(), &EditMode::Create);
    }

    #[test]
    fn record_without_row_cannot_be_edited() {
        let store = Arc::new(MemoryStore::new());
        let mut coordinator = coordinator(store);
        let record = LinkRecord::new(LinkId::new("x"), "https://a.io", "A", vec![], 1);
        assert!(matches!(
            coordinator.begin_edit_record(&record),
            Err(MutationError::MissingRow { .. })
        ));
    }

    #[test]
    fn aborted_error_message_counts_steps() {
        let err = MutationError::Aborted {
            completed: vec![MutationStep::Delete { row: 3 }],
            failed: MutationStep::Append {
                record: LinkRecord::new(LinkId::new("9"), "https://a.io", "A", vec![], 1),
            },
            source: StoreError::Network {
                message: "offline".into(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("append 9"));
        assert!(message.contains("1 completed step"));
        assert!(message.contains("offline"));
    }
}
