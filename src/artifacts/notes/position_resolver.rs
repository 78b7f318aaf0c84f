//! Note authoring state for a diff file
//!
//! Before a file is rendered, clients need to know whether its lines can take
//! new notes. The answer is computed once per requested file:
//!
//! - an anchor without a position never can,
//! - an anchor whose paths are not part of the diff cannot,
//! - an anchor whose line numbers fall outside every hunk of the file cannot.
//!
//! When the file was already picked by the request, `resolve_for_file` also
//! disables anchors that point at another file of the diff.
//!
//! Line checks are per side. Each line number that is present has to lie in
//! the matching range of one and the same hunk; absent numbers are not checked.

use crate::artifacts::diff::diff_file::DiffFileRecord;
use crate::artifacts::diff::file_collection::DiffFileCollection;
use crate::artifacts::notes::note_anchor::{DiffPosition, NoteAnchor};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

pub const MERGE_REQUEST_NOTEABLE_TYPE: &str = "MergeRequest";

/// The object notes are attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Noteable {
    pub noteable_type: &'static str,
    pub noteable_id: u64,
}

impl Noteable {
    pub fn merge_request(id: u64) -> Self {
        Noteable::new(MERGE_REQUEST_NOTEABLE_TYPE, id)
    }
}

/// Attributes a new note on this file starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNoteAttributes {
    pub noteable_type: &'static str,
    pub noteable_id: u64,
    pub commit_id: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteAttributes {
    pub disabled: bool,
    pub default_attrs: NewNoteAttributes,
}

#[derive(new)]
pub struct NotePositionResolver<'c> {
    collection: &'c DiffFileCollection,
    noteable: Noteable,
}

impl NotePositionResolver<'_> {
    pub fn resolve(&self, anchor: &NoteAnchor) -> NoteAttributes {
        let disabled = match &anchor.position {
            None => true,
            Some(position) => !self
                .anchored_file(position)
                .is_some_and(|file| lines_in_hunks(file, position)),
        };

        self.attributes(anchor, disabled)
    }

    /// Resolve against `file`, a record of the collection picked by the caller
    pub fn resolve_for_file(&self, file: &DiffFileRecord, anchor: &NoteAnchor) -> NoteAttributes {
        let disabled = match &anchor.position {
            None => true,
            Some(position) => !self.anchored_file(position).is_some_and(|anchored| {
                anchored.old_path == file.old_path
                    && anchored.new_path == file.new_path
                    && lines_in_hunks(file, position)
            }),
        };

        self.attributes(anchor, disabled)
    }

    fn attributes(&self, anchor: &NoteAnchor, disabled: bool) -> NoteAttributes {
        NoteAttributes {
            disabled,
            default_attrs: NewNoteAttributes {
                noteable_type: self.noteable.noteable_type,
                noteable_id: self.noteable.noteable_id,
                commit_id: anchor.commit_id.clone(),
            },
        }
    }

    fn anchored_file(&self, position: &DiffPosition) -> Option<&DiffFileRecord> {
        position
            .path_pair()
            .and_then(|(old_path, new_path)| self.collection.lookup(old_path, new_path))
    }
}

fn lines_in_hunks(file: &DiffFileRecord, position: &DiffPosition) -> bool {
    if position.old_line.is_none() && position.new_line.is_none() {
        return true;
    }

    file.hunks.iter().any(|hunk| {
        position
            .old_line
            .is_none_or(|line| hunk.contains_old_line(line))
            && position
                .new_line
                .is_none_or(|line| hunk.contains_new_line(line))
    })
}
