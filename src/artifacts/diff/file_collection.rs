//! Ordered per-file diff of a revision pair
//!
//! ## Building
//!
//! 1. Both revisions are resolved to root trees. A revision that does not
//!    exist, or that is not a commit or tree, is reported as not found.
//! 2. `TreeDiff` walks the trees and pairs identical content into renames.
//! 3. Every change becomes a `DiffFileRecord`. Regular files go through the
//!    `BlobDiffEngine` on the worker pool; gitlinks go through the
//!    `SubmoduleResolver` and are never blob-diffed.
//!
//! Records keep the tree walk order. The collection is immutable once built.

use crate::artifacts::diff::blob_diff::{BlobDiff, BlobDiffEngine};
use crate::artifacts::diff::diff_file::{ChangeKind, DiffFileRecord};
use crate::artifacts::diff::revision_pair::RevisionPair;
use crate::artifacts::diff::submodule::SubmoduleResolver;
use crate::artifacts::diff::tree_diff::{TreeChangeType, TreeDiff};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::store::{ObjectStore, StoreError, StoreResult};
use crate::artifacts::objects::tree::TreeEntryMap;
use crate::errors::{DiffError, DiffResult};
use rayon::ThreadPool;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

type PathPair = (Option<PathBuf>, Option<PathBuf>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffFileCollection {
    revision_pair: RevisionPair,
    files: Vec<DiffFileRecord>,
    by_paths: HashMap<PathPair, usize>,
    by_new_path: HashMap<PathBuf, usize>,
    deleted_by_path: HashMap<PathBuf, usize>,
}

impl DiffFileCollection {
    pub fn build<E, R>(
        revision_pair: &RevisionPair,
        store: &dyn ObjectStore,
        engine: &E,
        resolver: &R,
        pool: &ThreadPool,
    ) -> DiffResult<Self>
    where
        E: BlobDiffEngine + ?Sized,
        R: SubmoduleResolver + ?Sized,
    {
        let base = resolve_root_tree(store, revision_pair, revision_pair.base())?;
        let head = resolve_root_tree(store, revision_pair, revision_pair.head())?;

        let mut tree_diff = TreeDiff::new(store);
        tree_diff
            .compare_trees(&base, &head, Path::new(""))
            .map_err(|error| tree_resolution(revision_pair, error))?;
        tree_diff.detect_renames();

        let changes = tree_diff.into_changes().into_iter().collect::<Vec<_>>();
        tracing::debug!(pair = %revision_pair, changes = changes.len(), "diffing changed files");

        let files = pool
            .install(|| {
                changes
                    .into_par_iter()
                    .map(|(path, change)| file_record(path, change, engine, resolver))
                    .collect::<StoreResult<Vec<_>>>()
            })
            .map_err(|error| tree_resolution(revision_pair, error))?;

        Ok(Self::from_records(revision_pair.clone(), files))
    }

    /// Index already ordered records
    pub fn from_records(revision_pair: RevisionPair, files: Vec<DiffFileRecord>) -> Self {
        let mut by_paths = HashMap::new();
        let mut by_new_path = HashMap::new();
        let mut deleted_by_path = HashMap::new();

        for (index, file) in files.iter().enumerate() {
            by_paths
                .entry((file.old_path.clone(), file.new_path.clone()))
                .or_insert(index);
            match (&file.old_path, &file.new_path) {
                (_, Some(new_path)) => {
                    by_new_path.entry(new_path.clone()).or_insert(index);
                }
                (Some(old_path), None) => {
                    deleted_by_path.entry(old_path.clone()).or_insert(index);
                }
                (None, None) => {}
            }
        }

        DiffFileCollection {
            revision_pair,
            files,
            by_paths,
            by_new_path,
            deleted_by_path,
        }
    }

    pub fn revision_pair(&self) -> &RevisionPair {
        &self.revision_pair
    }

    pub fn files(&self) -> &[DiffFileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Find the record for a path pair
    ///
    /// Exact `(old_path, new_path)` matches win. Otherwise the first record
    /// whose new path is `new_path`. Callers name added and deleted files by
    /// the same path on both sides: a deleted file is only found when both
    /// requested paths name it.
    pub fn lookup(&self, old_path: &Path, new_path: &Path) -> Option<&DiffFileRecord> {
        let exact = (Some(old_path.to_path_buf()), Some(new_path.to_path_buf()));

        self.by_paths
            .get(&exact)
            .or_else(|| self.by_new_path.get(new_path))
            .or_else(|| {
                (old_path == new_path)
                    .then(|| self.deleted_by_path.get(old_path))
                    .flatten()
            })
            .map(|&index| &self.files[index])
    }
}

fn resolve_root_tree(
    store: &dyn ObjectStore,
    revision_pair: &RevisionPair,
    oid: &ObjectId,
) -> DiffResult<TreeEntryMap> {
    store.load_tree(oid).map_err(|error| match error {
        StoreError::MissingObject(_) | StoreError::UnexpectedType { .. } => {
            DiffError::not_found(format!("revision {oid}"))
        }
        error => tree_resolution(revision_pair, error),
    })
}

fn tree_resolution(revision_pair: &RevisionPair, error: StoreError) -> DiffError {
    tracing::error!(pair = %revision_pair, %error, "unable to resolve trees");

    DiffError::TreeResolution {
        pair: revision_pair.clone(),
        source: Box::new(error),
    }
}

fn file_record<E, R>(
    path: PathBuf,
    change: TreeChangeType,
    engine: &E,
    resolver: &R,
) -> StoreResult<DiffFileRecord>
where
    E: BlobDiffEngine + ?Sized,
    R: SubmoduleResolver + ?Sized,
{
    let change_kind = change.change_kind();
    let old = change.old_entry().cloned();
    let new = change.new_entry().cloned();

    let old_path = match &change {
        TreeChangeType::Renamed { from, .. } => Some(from.clone()),
        _ => old.as_ref().map(|_| path.clone()),
    };
    let new_path = new.as_ref().map(|_| path.clone());

    let old_commit = old.as_ref().filter(|entry| entry.is_submodule()).map(|entry| &entry.oid);
    let new_commit = new.as_ref().filter(|entry| entry.is_submodule()).map(|entry| &entry.oid);

    let diff = match change_kind {
        ChangeKind::SubmoduleChanged => {
            BlobDiff::new(vec![resolver.resolve(&path, old_commit, new_commit)], false)
        }
        ChangeKind::Renamed => BlobDiff::default(),
        _ => match (&old, &new) {
            // mode only
            (Some(old), Some(new)) if old.oid == new.oid => BlobDiff::default(),
            _ => engine.diff_blobs(
                old.as_ref().map(|entry| &entry.oid),
                new.as_ref().map(|entry| &entry.oid),
            )?,
        },
    };

    Ok(DiffFileRecord {
        old_path,
        new_path,
        change_kind,
        hunks: diff.hunks,
        is_binary: diff.is_binary,
        submodule_commit_id: new_commit.or(old_commit).cloned(),
        old_oid: old.as_ref().map(|entry| entry.oid.clone()),
        new_oid: new.as_ref().map(|entry| entry.oid.clone()),
        old_mode: old.as_ref().map(|entry| entry.mode),
        new_mode: new.as_ref().map(|entry| entry.mode),
    })
}
