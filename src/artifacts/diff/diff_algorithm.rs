//! Myers' line diff and hunk grouping
//!
//! `MyersDiff` computes the shortest edit script between two sequences. The
//! edit script is then cut into hunks: each change is surrounded by up to
//! `context` unchanged lines, and changes whose context overlaps are merged into
//! a single hunk.

use crate::artifacts::diff::diff_file::{Hunk, Line};
use derive_new::new;

/// Unchanged lines kept around each change, as in `git diff`
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// One step of an edit script, with 1-based line numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { a_line: usize, value: T },
    Insert { b_line: usize, value: T },
    Equal { a_line: usize, b_line: usize, value: T },
}

impl<T> Edit<T> {
    pub fn is_equal(&self) -> bool {
        matches!(self, Edit::Equal { .. })
    }
}

impl<T: Clone + Into<String>> From<&Edit<T>> for Line {
    fn from(edit: &Edit<T>) -> Self {
        match edit {
            Edit::Delete { a_line, value } => Line::removed(*a_line, value.clone()),
            Edit::Insert { b_line, value } => Line::added(*b_line, value.clone()),
            Edit::Equal {
                a_line,
                b_line,
                value,
            } => Line::context(*a_line, *b_line, value.clone()),
        }
    }
}

pub trait DiffAlgorithm<'d, T> {
    type Trace;
    type EditPath;
    type EditScript;

    fn compute_shortest_edit(&self) -> Self::Trace;
    fn backtrack(&self) -> Self::EditPath;
    fn diff(&self) -> Self::EditScript;
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<'d, T: Eq + Clone> DiffAlgorithm<'d, T> for MyersDiff<'d, T> {
    type Trace = Vec<Vec<isize>>;
    type EditPath = Vec<(isize, isize, isize, isize)>;
    type EditScript = Vec<Edit<T>>;

    fn compute_shortest_edit(&self) -> Self::Trace {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (n + m) as usize;

        let mut v = vec![0; 2 * offset + 2];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset as isize + k) as usize;

                let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                    // came from k+1, an insertion
                    v[idx + 1]
                } else {
                    // came from k-1, a deletion
                    v[idx - 1] + 1
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    fn backtrack(&self) -> Self::EditPath {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let offset = x + y;
        let mut edit_path = Vec::new();

        let trace = self.compute_shortest_edit();

        for (d, v) in trace.iter().enumerate().rev() {
            let d = d as isize;
            let k = x - y;

            let prev_k = if k == -d
                || (k != d && v[(offset + k - 1) as usize] < v[(offset + k + 1) as usize])
            {
                k + 1
            } else {
                k - 1
            };

            let prev_x = v[(offset + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edit_path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                edit_path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        edit_path
    }

    fn diff(&self) -> Self::EditScript {
        let mut diff = self
            .backtrack()
            .into_iter()
            .map(|(prev_x, prev_y, x, y)| {
                if x == prev_x {
                    Edit::Insert {
                        b_line: prev_y as usize + 1,
                        value: self.b[prev_y as usize].clone(),
                    }
                } else if y == prev_y {
                    Edit::Delete {
                        a_line: prev_x as usize + 1,
                        value: self.a[prev_x as usize].clone(),
                    }
                } else {
                    Edit::Equal {
                        a_line: prev_x as usize + 1,
                        b_line: prev_y as usize + 1,
                        value: self.a[prev_x as usize].clone(),
                    }
                }
            })
            .collect::<Vec<_>>();

        diff.reverse();
        diff
    }
}

/// Cut an edit script into hunks with `context` lines around each change
///
/// Two changes separated by at most `2 * context` unchanged lines share a hunk.
pub fn group_hunks<T: Clone + Into<String>>(edits: &[Edit<T>], context: usize) -> Vec<Hunk> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for (index, _) in edits.iter().enumerate().filter(|(_, edit)| !edit.is_equal()) {
        let start = index.saturating_sub(context);
        let end = (index + context + 1).min(edits.len());

        match ranges.last_mut() {
            Some((_, last_end)) if start <= *last_end => *last_end = end,
            _ => ranges.push((start, end)),
        }
    }

    ranges
        .into_iter()
        .map(|(start, end)| {
            let preceding = &edits[..start];
            let old_before = preceding
                .iter()
                .filter(|edit| !matches!(edit, Edit::Insert { .. }))
                .count();
            let new_before = preceding
                .iter()
                .filter(|edit| !matches!(edit, Edit::Delete { .. }))
                .count();

            Hunk::from_lines_after(
                edits[start..end].iter().map(Line::from).collect(),
                old_before,
                new_before,
            )
        })
        .collect()
}
