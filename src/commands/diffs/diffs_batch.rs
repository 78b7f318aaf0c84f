use crate::areas::merge_requests::MergeRequest;
use crate::areas::repository::Repository;
use crate::artifacts::diff::paginator::{self, DiffBatch, PaginationWindow};
use crate::errors::{DiffError, DiffResult};

pub const BATCH_LOAD_FEATURE: &str = "diffs_batch_load";

impl Repository {
    /// One page of the merge request's files
    ///
    /// The batch gate is checked first: with it off the request fails whatever
    /// the window.
    pub fn diffs_batch(
        &self,
        merge_request: &MergeRequest,
        page: usize,
        per_page: usize,
    ) -> DiffResult<DiffBatch> {
        if !self.config().is_batch_enabled() {
            return Err(DiffError::FeatureDisabled(BATCH_LOAD_FEATURE));
        }

        let window = PaginationWindow::new(page, per_page)?;
        let collection = self.diff_collection(&merge_request.diff_refs)?;

        Ok(paginator::page(collection, window))
    }
}
