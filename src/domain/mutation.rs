//! Patches applied to a collection snapshot once the service has confirmed a mutation.
//!
//! A list page never edits its collection while a request is pending: it keeps the snapshot,
//! awaits the outcome, and then replaces the snapshot with the result of one of these functions.

use crate::domain::model::{CatalogEntity, EntityId};
use std::collections::BTreeSet;

/// Returns the snapshot without the records whose id is in `ids`.
pub fn without_ids<E: CatalogEntity>(snapshot: &[E], ids: &[EntityId]) -> Vec<E> {
    let ids: BTreeSet<&EntityId> = ids.iter().collect();
    snapshot
        .iter()
        .filter(|r| !ids.contains(r.id()))
        .cloned()
        .collect()
}

/// Returns the snapshot with the record sharing `updated`'s id replaced, or appended when absent.
pub fn with_record<E: CatalogEntity>(snapshot: &[E], updated: E) -> Vec<E> {
    let mut next: Vec<E> = snapshot.to_vec();
    match next.iter_mut().find(|r| r.id() == updated.id()) {
        Some(slot) => *slot = updated,
        None => next.push(updated),
    }
    next
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub id: EntityId,
    pub message: String,
}

/// Settled outcome of a bulk delete: one entry per requested id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<EntityId>,
    pub failed: Vec<DeleteFailure>,
}

impl DeleteReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.failed.iter().map(|f| &f.id)
    }
}
