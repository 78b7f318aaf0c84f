use crate::areas::config::DiffsConfig;
use crate::areas::database::Database;
use crate::areas::diff_cache::DiffCache;
use crate::areas::merge_requests::MergeRequests;
use crate::artifacts::diff::blob_diff::{BlobDiffEngine, MyersBlobDiff};
use crate::artifacts::diff::file_collection::DiffFileCollection;
use crate::artifacts::diff::revision_pair::RevisionPair;
use crate::artifacts::diff::submodule::{SubmoduleResolver, SubprojectCommitResolver};
use crate::artifacts::objects::store::ObjectStore;
use crate::errors::DiffResult;
use anyhow::Context;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::path::Path;
use std::sync::Arc;

/// Everything the diffs commands run against
///
/// The repository owns the object store, the per-pair collection cache, the
/// worker pool blob diffs run on and the known merge requests. It is `Sync`
/// and meant to be shared by concurrent requests.
pub struct Repository {
    store: Box<dyn ObjectStore + Send>,
    diff_cache: DiffCache,
    merge_requests: MergeRequests,
    config: DiffsConfig,
    pool: ThreadPool,
}

impl Repository {
    pub fn new(store: Box<dyn ObjectStore + Send>, config: DiffsConfig) -> anyhow::Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers())
            .thread_name(|index| format!("mrdiff-worker-{index}"))
            .build()
            .context("Unable to start diff workers")?;

        Ok(Repository {
            store,
            diff_cache: DiffCache::new(),
            merge_requests: MergeRequests::new(),
            config,
            pool,
        })
    }

    /// Open the loose object database of the repository at `git_dir`
    pub fn open(git_dir: impl AsRef<Path>, config: DiffsConfig) -> anyhow::Result<Self> {
        let git_dir = git_dir.as_ref();
        let objects_path = git_dir.join("objects");

        if !objects_path.is_dir() {
            anyhow::bail!("Not a repository: {}", git_dir.display());
        }

        let database = Database::new(objects_path.into_boxed_path());
        Self::new(Box::new(database), config)
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &DiffsConfig {
        &self.config
    }

    pub fn merge_requests(&self) -> &MergeRequests {
        &self.merge_requests
    }

    pub fn diff_cache(&self) -> &DiffCache {
        &self.diff_cache
    }

    /// The cached collection of `pair`, built with the default engines on first use
    pub fn diff_collection(&self, pair: &RevisionPair) -> DiffResult<Arc<DiffFileCollection>> {
        let engine = MyersBlobDiff::new(self.store());
        self.diff_collection_with(pair, &engine, &SubprojectCommitResolver)
    }

    pub fn diff_collection_with<E, R>(
        &self,
        pair: &RevisionPair,
        engine: &E,
        resolver: &R,
    ) -> DiffResult<Arc<DiffFileCollection>>
    where
        E: BlobDiffEngine + ?Sized,
        R: SubmoduleResolver + ?Sized,
    {
        self.diff_cache.get_or_build(pair, || {
            DiffFileCollection::build(pair, self.store(), engine, resolver, &self.pool)
        })
    }
}
