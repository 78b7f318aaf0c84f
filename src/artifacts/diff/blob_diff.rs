//! Blob-level diffing
//!
//! A `BlobDiffEngine` turns a pair of blob ids into hunks. One side is absent
//! for added and deleted files. Engines are shared across the worker pool while
//! a collection is being built, so they must be `Sync` and free of mutable
//! state.

use crate::artifacts::diff::diff_algorithm::{DEFAULT_CONTEXT_LINES, DiffAlgorithm, MyersDiff, group_hunks};
use crate::artifacts::diff::diff_file::Hunk;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::store::{ObjectStore, StoreResult};
use derive_new::new;

#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct BlobDiff {
    pub hunks: Vec<Hunk>,
    pub is_binary: bool,
}

impl BlobDiff {
    pub fn binary() -> Self {
        BlobDiff::new(Vec::new(), true)
    }
}

pub trait BlobDiffEngine: Sync {
    fn diff_blobs(&self, old: Option<&ObjectId>, new: Option<&ObjectId>) -> StoreResult<BlobDiff>;
}

impl<F> BlobDiffEngine for F
where
    F: Fn(Option<&ObjectId>, Option<&ObjectId>) -> StoreResult<BlobDiff> + Sync,
{
    fn diff_blobs(&self, old: Option<&ObjectId>, new: Option<&ObjectId>) -> StoreResult<BlobDiff> {
        self(old, new)
    }
}

/// Line diff of blob contents read from an object store
pub struct MyersBlobDiff<'s> {
    store: &'s dyn ObjectStore,
    context: usize,
}

impl<'s> MyersBlobDiff<'s> {
    pub fn new(store: &'s dyn ObjectStore) -> Self {
        MyersBlobDiff {
            store,
            context: DEFAULT_CONTEXT_LINES,
        }
    }

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    fn load(&self, oid: Option<&ObjectId>) -> StoreResult<Option<Blob>> {
        oid.map(|oid| self.store.load_blob(oid)).transpose()
    }
}

impl BlobDiffEngine for MyersBlobDiff<'_> {
    fn diff_blobs(&self, old: Option<&ObjectId>, new: Option<&ObjectId>) -> StoreResult<BlobDiff> {
        let old = self.load(old)?;
        let new = self.load(new)?;

        if [&old, &new]
            .into_iter()
            .flatten()
            .any(|blob| blob.is_binary())
        {
            return Ok(BlobDiff::binary());
        }

        let old_lines = old.map(|blob| blob.lines()).unwrap_or_default();
        let new_lines = new.map(|blob| blob.lines()).unwrap_or_default();

        let edits = MyersDiff::new(&old_lines, &new_lines).diff();
        Ok(BlobDiff::new(group_hunks(&edits, self.context), false))
    }
}
