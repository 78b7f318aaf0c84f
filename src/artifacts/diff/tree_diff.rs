use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::diff::diff_file::ChangeKind;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::store::{ObjectStore, StoreResult};
use crate::artifacts::objects::tree::TreeEntryMap;
use bitflags::bitflags;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::{Path, PathBuf};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b00001;
        const DELETED = 0b00010;
        const MODIFIED = 0b00100;
        const RENAMED = 0b01000;
        const SUBMODULE = 0b10000;
    }
}

impl DiffFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                'R' => filter |= Self::RENAMED,
                'S' => filter |= Self::SUBMODULE,
                _ => return None,
            }
        }

        Some(filter)
    }

    pub fn matches(&self, kind: ChangeKind) -> bool {
        match kind {
            ChangeKind::Added => self.contains(DiffFilter::ADDED),
            ChangeKind::Deleted => self.contains(DiffFilter::DELETED),
            ChangeKind::Modified => self.contains(DiffFilter::MODIFIED),
            ChangeKind::Renamed => self.contains(DiffFilter::RENAMED),
            ChangeKind::SubmoduleChanged => self.contains(DiffFilter::SUBMODULE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeChangeType {
    Added(DatabaseEntry),
    Deleted(DatabaseEntry),
    Modified {
        old: DatabaseEntry,
        new: DatabaseEntry,
    },
    Renamed {
        from: PathBuf,
        old: DatabaseEntry,
        new: DatabaseEntry,
    },
}

impl TreeChangeType {
    pub fn from_entries(old: Option<DatabaseEntry>, new: Option<DatabaseEntry>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(TreeChangeType::Added(new)),
            (Some(old), None) => Some(TreeChangeType::Deleted(old)),
            (Some(old), Some(new)) if old != new => Some(TreeChangeType::Modified { old, new }),
            _ => None,
        }
    }

    pub fn old_entry(&self) -> Option<&DatabaseEntry> {
        match self {
            TreeChangeType::Deleted(entry) => Some(entry),
            TreeChangeType::Modified { old, .. } | TreeChangeType::Renamed { old, .. } => Some(old),
            TreeChangeType::Added(_) => None,
        }
    }

    pub fn new_entry(&self) -> Option<&DatabaseEntry> {
        match self {
            TreeChangeType::Added(entry) => Some(entry),
            TreeChangeType::Modified { new, .. } | TreeChangeType::Renamed { new, .. } => Some(new),
            TreeChangeType::Deleted(_) => None,
        }
    }

    /// Gitlinks on either side turn any change into a submodule change
    pub fn change_kind(&self) -> ChangeKind {
        let touches_submodule = self
            .old_entry()
            .into_iter()
            .chain(self.new_entry())
            .any(DatabaseEntry::is_submodule);

        match self {
            _ if touches_submodule => ChangeKind::SubmoduleChanged,
            TreeChangeType::Added(_) => ChangeKind::Added,
            TreeChangeType::Deleted(_) => ChangeKind::Deleted,
            TreeChangeType::Modified { .. } => ChangeKind::Modified,
            TreeChangeType::Renamed { .. } => ChangeKind::Renamed,
        }
    }
}

/// Changes keyed by the path a reader sees them at, in tree walk order
pub type ChangeSet = BTreeMap<PathBuf, TreeChangeType>;

pub struct TreeDiff<'s> {
    store: &'s dyn ObjectStore,
    change_set: ChangeSet,
}

impl<'s> TreeDiff<'s> {
    pub fn new(store: &'s dyn ObjectStore) -> Self {
        TreeDiff {
            store,
            change_set: BTreeMap::new(),
        }
    }

    pub fn into_changes(self) -> ChangeSet {
        self.change_set
    }

    pub fn compare_oids(
        &mut self,
        old: Option<&ObjectId>,
        new: Option<&ObjectId>,
        prefix: &Path,
    ) -> StoreResult<()> {
        if old == new {
            return Ok(());
        }

        let old_tree_entries = self.load_tree_entries(old)?;
        let new_tree_entries = self.load_tree_entries(new)?;

        self.compare_trees(&old_tree_entries, &new_tree_entries, prefix)
    }

    /// Compare two already loaded trees, loading subtrees as needed
    pub fn compare_trees(
        &mut self,
        old: &TreeEntryMap,
        new: &TreeEntryMap,
        prefix: &Path,
    ) -> StoreResult<()> {
        self.detect_deletions(old, new, prefix)?;
        self.detect_additions(old, new, prefix)?;

        Ok(())
    }

    /// Pair deleted and added files with identical content into renames
    ///
    /// The rename takes the added path's place. When several deleted paths
    /// share the content, they are consumed in path order.
    pub fn detect_renames(&mut self) {
        let mut deleted: HashMap<DatabaseEntry, VecDeque<PathBuf>> = HashMap::new();
        for (path, change) in &self.change_set {
            if let TreeChangeType::Deleted(entry) = change
                && !entry.is_submodule()
            {
                deleted
                    .entry(entry.clone())
                    .or_default()
                    .push_back(path.clone());
            }
        }

        let added = self
            .change_set
            .iter()
            .filter_map(|(path, change)| match change {
                TreeChangeType::Added(entry) if !entry.is_submodule() => {
                    Some((path.clone(), entry.clone()))
                }
                _ => None,
            })
            .collect::<Vec<_>>();

        for (path, entry) in added {
            let Some(from) = deleted
                .get_mut(&entry)
                .and_then(|candidates| candidates.pop_front())
            else {
                continue;
            };

            self.change_set.remove(&from);
            self.change_set.insert(
                path,
                TreeChangeType::Renamed {
                    from,
                    old: entry.clone(),
                    new: entry,
                },
            );
        }
    }

    fn load_tree_entries(&self, oid: Option<&ObjectId>) -> StoreResult<TreeEntryMap> {
        match oid {
            None => Ok(BTreeMap::new()),
            Some(oid) => self.store.load_tree(oid),
        }
    }

    fn detect_deletions(
        &mut self,
        old: &TreeEntryMap,
        new: &TreeEntryMap,
        prefix: &Path,
    ) -> StoreResult<()> {
        for (name, entry) in old {
            let path = prefix.join(name);
            let other = new.get(name);

            if other == Some(entry) {
                continue;
            }

            let tree_a_oid = entry.is_tree().then_some(&entry.oid);
            let tree_b_oid = other
                .filter(|other| other.is_tree())
                .map(|other| &other.oid);

            self.compare_oids(tree_a_oid, tree_b_oid, &path)?;

            let blob_a = (!entry.is_tree()).then(|| entry.clone());
            let blob_b = other.filter(|other| !other.is_tree()).cloned();

            if let Some(change_type) = TreeChangeType::from_entries(blob_a, blob_b) {
                self.change_set.insert(path, change_type);
            }
        }

        Ok(())
    }

    fn detect_additions(
        &mut self,
        old: &TreeEntryMap,
        new: &TreeEntryMap,
        prefix: &Path,
    ) -> StoreResult<()> {
        for (name, entry) in new {
            if old.contains_key(name) {
                continue;
            }

            let path = prefix.join(name);
            if entry.is_tree() {
                self.compare_oids(None, Some(&entry.oid), &path)?;
            } else {
                self.change_set
                    .insert(path, TreeChangeType::Added(entry.clone()));
            }
        }

        Ok(())
    }
}
