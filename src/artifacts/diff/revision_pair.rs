use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// The two snapshots a merge request diff compares
///
/// Either side may name a commit or a tree. Pairs are immutable and serve as
/// the cache key for built diff collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct RevisionPair {
    base: ObjectId,
    head: ObjectId,
}

impl RevisionPair {
    pub fn base(&self) -> &ObjectId {
        &self.base
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }
}

impl std::fmt::Display for RevisionPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}...{}",
            self.base.to_short_oid(),
            self.head.to_short_oid()
        )
    }
}
