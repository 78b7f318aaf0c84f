//! Rendering of submodule pointer changes
//!
//! A gitlink stores the commit id of another repository. Its "content" is a
//! 40 character reference, so a line diff of it carries no information. The
//! collection hands such paths to a `SubmoduleResolver` instead, which produces
//! the single hunk shown for the file.

use crate::artifacts::diff::diff_file::{Hunk, Line};
use crate::artifacts::objects::object_id::ObjectId;
use std::path::Path;

pub trait SubmoduleResolver: Sync {
    fn resolve(&self, path: &Path, old_commit: Option<&ObjectId>, new_commit: Option<&ObjectId>) -> Hunk;
}

impl<F> SubmoduleResolver for F
where
    F: Fn(&Path, Option<&ObjectId>, Option<&ObjectId>) -> Hunk + Sync,
{
    fn resolve(&self, path: &Path, old_commit: Option<&ObjectId>, new_commit: Option<&ObjectId>) -> Hunk {
        self(path, old_commit, new_commit)
    }
}

/// `Subproject commit <id>` lines, as `git diff` prints them
#[derive(Debug, Clone, Copy, Default)]
pub struct SubprojectCommitResolver;

impl SubprojectCommitResolver {
    pub fn line_text(commit: &ObjectId) -> String {
        format!("Subproject commit {commit}")
    }
}

impl SubmoduleResolver for SubprojectCommitResolver {
    fn resolve(&self, _path: &Path, old_commit: Option<&ObjectId>, new_commit: Option<&ObjectId>) -> Hunk {
        let removed = old_commit.map(|commit| Line::removed(1, Self::line_text(commit)));
        let added = new_commit.map(|commit| Line::added(1, Self::line_text(commit)));

        Hunk::from_lines(removed.into_iter().chain(added).collect())
    }
}
