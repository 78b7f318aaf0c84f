use crate::artifacts::diff::revision_pair::RevisionPair;
use crate::artifacts::notes::position_resolver::Noteable;
use crate::errors::{DiffError, DiffResult};
use derive_new::new;
use parking_lot::RwLock;
use std::collections::HashMap;

/// A merge request as callers name it: project plus project-scoped number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct MergeRequestRef {
    pub project_id: u64,
    pub iid: u64,
}

impl std::fmt::Display for MergeRequestRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}!{}", self.project_id, self.iid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MergeRequest {
    pub id: u64,
    pub project_id: u64,
    pub iid: u64,
    /// Revisions of the merge request's current diff
    pub diff_refs: RevisionPair,
}

impl MergeRequest {
    pub fn reference(&self) -> MergeRequestRef {
        MergeRequestRef::new(self.project_id, self.iid)
    }

    pub fn noteable(&self) -> Noteable {
        Noteable::merge_request(self.id)
    }
}

/// Merge requests known to this process
#[derive(Debug, Default)]
pub struct MergeRequests {
    by_ref: RwLock<HashMap<MergeRequestRef, MergeRequest>>,
}

impl MergeRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the merge request under its reference
    pub fn register(&self, merge_request: MergeRequest) {
        self.by_ref
            .write()
            .insert(merge_request.reference(), merge_request);
    }

    /// A merge request of another project is as absent as a missing one
    pub fn find(&self, reference: &MergeRequestRef) -> DiffResult<MergeRequest> {
        self.by_ref
            .read()
            .get(reference)
            .cloned()
            .ok_or_else(|| DiffError::not_found(format!("merge request {reference}")))
    }
}
