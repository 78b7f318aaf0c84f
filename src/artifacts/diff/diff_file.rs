//! Per-file diff records
//!
//! A `DiffFileRecord` is one entry of a merge request diff: which paths changed,
//! how, and the hunks describing the change. Records are immutable once built
//! and shared between every page and path lookup served from the cache.

use crate::artifacts::database::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    SubmoduleChanged,
}

impl ChangeKind {
    pub fn status_char(&self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Deleted => 'D',
            ChangeKind::Renamed => 'R',
            ChangeKind::SubmoduleChanged => 'S',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Context,
    Added,
    Removed,
}

impl LineKind {
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Added => '+',
            LineKind::Removed => '-',
        }
    }
}

/// One line of a hunk
///
/// Context lines carry both line numbers, added lines only the new one and
/// removed lines only the old one. Numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    pub kind: LineKind,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub text: String,
}

impl Line {
    pub fn context(old_line: usize, new_line: usize, text: impl Into<String>) -> Self {
        Line {
            kind: LineKind::Context,
            old_line: Some(old_line),
            new_line: Some(new_line),
            text: text.into(),
        }
    }

    pub fn added(new_line: usize, text: impl Into<String>) -> Self {
        Line {
            kind: LineKind::Added,
            old_line: None,
            new_line: Some(new_line),
            text: text.into(),
        }
    }

    pub fn removed(old_line: usize, text: impl Into<String>) -> Self {
        Line {
            kind: LineKind::Removed,
            old_line: Some(old_line),
            new_line: None,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.text)
    }
}

/// Contiguous block of changed lines plus surrounding context
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<Line>,
}

impl Hunk {
    /// Derive the hunk ranges from lines at the top of a file
    ///
    /// An empty side starts at `0`, matching the `@@ -0,0 +1,n @@` convention
    /// for added files.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self::from_lines_after(lines, 0, 0)
    }

    /// Derive the hunk ranges from lines preceded by `old_before` and
    /// `new_before` lines on each side
    ///
    /// An empty side starts at the line preceding the hunk, as `git diff`
    /// prints pure insertions and deletions.
    pub fn from_lines_after(lines: Vec<Line>, old_before: usize, new_before: usize) -> Self {
        let old_numbers = lines.iter().filter_map(|line| line.old_line);
        let new_numbers = lines.iter().filter_map(|line| line.new_line);

        let old_count = old_numbers.clone().count();
        let new_count = new_numbers.clone().count();

        Hunk {
            old_start: old_numbers.min().unwrap_or(old_before),
            old_count,
            new_start: new_numbers.min().unwrap_or(new_before),
            new_count,
            lines,
        }
    }

    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }

    pub fn contains_old_line(&self, line: usize) -> bool {
        self.old_count > 0 && (self.old_start..self.old_start + self.old_count).contains(&line)
    }

    pub fn contains_new_line(&self, line: usize) -> bool {
        self.new_count > 0 && (self.new_start..self.new_start + self.new_count).contains(&line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffFileRecord {
    pub old_path: Option<PathBuf>,
    pub new_path: Option<PathBuf>,
    pub change_kind: ChangeKind,
    pub hunks: Vec<Hunk>,
    pub is_binary: bool,
    pub submodule_commit_id: Option<ObjectId>,
    pub old_oid: Option<ObjectId>,
    pub new_oid: Option<ObjectId>,
    pub old_mode: Option<EntryMode>,
    pub new_mode: Option<EntryMode>,
}

impl DiffFileRecord {
    /// The path a reader would name this file by: the new one unless deleted
    pub fn file_path(&self) -> &Path {
        self.new_path
            .as_deref()
            .or(self.old_path.as_deref())
            .unwrap_or_else(|| Path::new(""))
    }
}
