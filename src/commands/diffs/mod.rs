//! The diffs request modes
//!
//! Every request names a merge request and one of three modes:
//!
//! - `Full`: the whole collection (`show`)
//! - `SinglePath`: one file plus its note attributes (`diff_for_path`)
//! - `Batch`: one page of files (`diffs_batch`)
//!
//! Access is checked by the caller and handed in through `RequestContext`. A
//! request without verified access fails as not found before any work is
//! done, so callers cannot probe for merge requests they cannot read.

use crate::areas::merge_requests::{MergeRequest, MergeRequestRef};
use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_view::DiffViewMode;
use crate::artifacts::diff::file_collection::DiffFileCollection;
use crate::artifacts::diff::paginator::DiffBatch;
use crate::artifacts::notes::note_anchor::NoteAnchor;
use crate::errors::{DiffError, DiffResult};
use derive_new::new;
use std::path::PathBuf;
use std::sync::Arc;

pub mod diff_for_path;
pub mod diffs_batch;
pub mod show;

pub use diff_for_path::DiffForPath;

/// Who is asking, and whether their read access was already verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct RequestContext {
    pub actor_id: Option<u64>,
    pub access_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffsMode {
    Full,
    SinglePath {
        old_path: PathBuf,
        new_path: PathBuf,
        anchor: NoteAnchor,
    },
    /// Adapters normalize raw parameters with `PaginationWindow::from_params`
    Batch { page: usize, per_page: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DiffsRequest {
    pub merge_request: MergeRequestRef,
    pub mode: DiffsMode,
    pub view_preference: Option<String>,
}

#[derive(Debug, Clone)]
pub enum DiffsPayload {
    Full(Arc<DiffFileCollection>),
    SinglePath(DiffForPath),
    Batch(DiffBatch),
}

#[derive(Debug, Clone)]
pub struct DiffsResponse {
    pub merge_request: MergeRequest,
    /// Normalized view to persist, `None` when nothing valid was requested
    pub view: Option<DiffViewMode>,
    pub payload: DiffsPayload,
}

impl Repository {
    pub fn diffs(&self, context: &RequestContext, request: &DiffsRequest) -> DiffResult<DiffsResponse> {
        let result = self.dispatch_diffs(context, request);

        if let Err(error) = &result
            && error.is_not_found_externally()
        {
            tracing::warn!(
                merge_request = %request.merge_request,
                actor = ?context.actor_id,
                %error,
                "diffs request not served"
            );
        }

        result
    }

    fn dispatch_diffs(&self, context: &RequestContext, request: &DiffsRequest) -> DiffResult<DiffsResponse> {
        if !context.access_verified {
            return Err(DiffError::not_found(format!(
                "merge request {}",
                request.merge_request
            )));
        }

        let merge_request = self.merge_requests().find(&request.merge_request)?;

        let payload = match &request.mode {
            DiffsMode::Full => DiffsPayload::Full(self.show(&merge_request)?),
            DiffsMode::SinglePath {
                old_path,
                new_path,
                anchor,
            } => DiffsPayload::SinglePath(self.diff_for_path(&merge_request, old_path, new_path, anchor)?),
            DiffsMode::Batch { page, per_page } => {
                DiffsPayload::Batch(self.diffs_batch(&merge_request, *page, *per_page)?)
            }
        };

        let view = request
            .view_preference
            .as_deref()
            .and_then(DiffViewMode::normalize);

        Ok(DiffsResponse {
            merge_request,
            view,
            payload,
        })
    }
}
