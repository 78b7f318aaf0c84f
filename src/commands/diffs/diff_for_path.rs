use crate::areas::merge_requests::MergeRequest;
use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_file::DiffFileRecord;
use crate::artifacts::diff::file_collection::DiffFileCollection;
use crate::artifacts::notes::note_anchor::NoteAnchor;
use crate::artifacts::notes::position_resolver::{NewNoteAttributes, NotePositionResolver, Noteable};
use crate::errors::{DiffError, DiffResult};
use std::path::Path;

/// One file of a diff with the note state its viewer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffForPath {
    pub file: DiffFileRecord,
    pub disabled: bool,
    pub default_attrs: NewNoteAttributes,
}

/// Extract one file from a built collection
pub fn diff_for_path(
    collection: &DiffFileCollection,
    old_path: &Path,
    new_path: &Path,
    anchor: &NoteAnchor,
    noteable: Noteable,
) -> DiffResult<DiffForPath> {
    let file = collection
        .lookup(old_path, new_path)
        .ok_or_else(|| DiffError::not_found(format!("path {}", new_path.display())))?;

    let attributes = NotePositionResolver::new(collection, noteable).resolve_for_file(file, anchor);

    Ok(DiffForPath {
        file: file.clone(),
        disabled: attributes.disabled,
        default_attrs: attributes.default_attrs,
    })
}

impl Repository {
    pub fn diff_for_path(
        &self,
        merge_request: &MergeRequest,
        old_path: &Path,
        new_path: &Path,
        anchor: &NoteAnchor,
    ) -> DiffResult<DiffForPath> {
        let collection = self.diff_collection(&merge_request.diff_refs)?;

        diff_for_path(&collection, old_path, new_path, anchor, merge_request.noteable())
    }
}
