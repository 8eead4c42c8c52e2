//! Mutation plans: the store calls a create, update or remove turns into.
//!
//! The store has no update operation, so an update is a delete of the old row
//! followed by an append of the new record. The two calls are not atomic;
//! if the append fails after the delete went out, the link is gone remotely
//! until the owner re-adds it.

use std::fmt;

use tracing::debug;

use super::MutationError;
use crate::domain::LinkRecord;
use crate::session::Credential;
use crate::store::RecordStore;

/// A single store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationStep {
    Delete { row: u64 },
    Append { record: LinkRecord },
}

impl fmt::Display for MutationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationStep::Delete { row } => write!(f, "delete row {}", row),
            MutationStep::Append { record } => write!(f, "append {}", record.identifier),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationPlan {
    Create { insert: LinkRecord },
    Update { delete_row: u64, insert: LinkRecord },
    Remove { row: u64 },
}

impl MutationPlan {
    /// Store calls in execution order.
    pub fn steps(&self) -> Vec<MutationStep> {
        match self {
            MutationPlan::Create { insert } => vec![MutationStep::Append {
                record: insert.clone(),
            }],
            MutationPlan::Update { delete_row, insert } => vec![
                MutationStep::Delete { row: *delete_row },
                MutationStep::Append {
                    record: insert.clone(),
                },
            ],
            MutationPlan::Remove { row } => vec![MutationStep::Delete { row: *row }],
        }
    }

    /// The record this plan writes, if any.
    pub fn inserted(&self) -> Option<&LinkRecord> {
        match self {
            MutationPlan::Create { insert } | MutationPlan::Update { insert, .. } => Some(insert),
            MutationPlan::Remove { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MutationPlan::Create { .. } => "create",
            MutationPlan::Update { .. } => "update",
            MutationPlan::Remove { .. } => "remove",
        }
    }

    /// Issue each step in order, stopping at the first transport failure.
    pub async fn execute(
        &self,
        store: &dyn RecordStore,
        credential: &Credential,
    ) -> Result<(), MutationError> {
        let mut completed = Vec::new();
        for step in self.steps() {
            debug!(plan = self.kind(), %step, "issuing mutation step");
            let result = match &step {
                MutationStep::Delete { row } => store.delete(credential, *row).await,
                MutationStep::Append { record } => store.append(credential, record).await,
            };
            if let Err(source) = result {
                return Err(MutationError::Aborted {
                    completed,
                    failed: step,
                    source,
                });
            }
            completed.push(step);
        }
        Ok(())
    }
}
