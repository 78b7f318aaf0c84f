//! Merge request diffs
//!
//! Leaves first:
//!
//! - `diff_algorithm`: Myers' diff and hunk grouping
//! - `diff_file`: per-file records, hunks and lines
//! - `blob_diff`: blob pair to hunks, behind the `BlobDiffEngine` seam
//! - `submodule`: `Subproject commit` hunks for gitlinks
//! - `tree_diff`: which paths changed between two trees
//! - `file_collection`: the ordered, indexed per-file diff of a revision pair
//! - `paginator`: page windows over a collection
//! - `diff_view`: requested view mode normalization

pub mod blob_diff;
pub mod diff_algorithm;
pub mod diff_file;
pub mod diff_view;
pub mod file_collection;
pub mod paginator;
pub mod revision_pair;
pub mod submodule;
pub mod tree_diff;
