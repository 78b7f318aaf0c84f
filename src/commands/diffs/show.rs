use crate::areas::merge_requests::MergeRequest;
use crate::areas::repository::Repository;
use crate::artifacts::diff::file_collection::DiffFileCollection;
use crate::errors::DiffResult;
use std::sync::Arc;

impl Repository {
    /// The full, cached diff of the merge request
    pub fn show(&self, merge_request: &MergeRequest) -> DiffResult<Arc<DiffFileCollection>> {
        self.diff_collection(&merge_request.diff_refs)
    }
}
