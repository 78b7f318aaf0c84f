use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

/// File and line coordinates of a note within a diff
///
/// Line numbers are 1-based. A note on an added line has only `new_line`, one
/// on a removed line only `old_line`, one on a context line both. A note on the
/// file as a whole has neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffPosition {
    pub old_path: Option<PathBuf>,
    pub new_path: Option<PathBuf>,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
}

impl DiffPosition {
    pub fn for_paths(old_path: impl Into<PathBuf>, new_path: impl Into<PathBuf>) -> Self {
        DiffPosition {
            old_path: Some(old_path.into()),
            new_path: Some(new_path.into()),
            ..Default::default()
        }
    }

    pub fn with_lines(mut self, old_line: Option<usize>, new_line: Option<usize>) -> Self {
        self.old_line = old_line;
        self.new_line = new_line;
        self
    }

    /// Path pair as the collection indexes it, each side standing in for a missing other
    pub fn path_pair(&self) -> Option<(&Path, &Path)> {
        let old_path = self.old_path.as_deref().or(self.new_path.as_deref())?;
        let new_path = self.new_path.as_deref().or(self.old_path.as_deref())?;
        Some((old_path, new_path))
    }
}

/// Where a note sits, if anywhere
///
/// Notes written before positions were recorded have no position at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteAnchor {
    pub position: Option<DiffPosition>,
    pub commit_id: Option<ObjectId>,
}

impl NoteAnchor {
    pub fn new(position: Option<DiffPosition>, commit_id: Option<ObjectId>) -> Self {
        NoteAnchor {
            position,
            commit_id,
        }
    }

    pub fn unpositioned(commit_id: Option<ObjectId>) -> Self {
        NoteAnchor::new(None, commit_id)
    }
}
