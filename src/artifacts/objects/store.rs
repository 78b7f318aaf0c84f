//! Read side of the object store
//!
//! The diff engine never touches storage directly. It asks an `ObjectStore`
//! for tree listings and blob contents by object id, so the on-disk loose object
//! database, an in-memory map or a remote backend can sit behind it.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::TreeEntryMap;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No object with this id exists in the store.
    #[error("object {0} not found")]
    MissingObject(ObjectId),

    /// The object exists but is not of the requested kind.
    #[error("object {oid} is a {actual}, expected {expected}")]
    UnexpectedType {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    /// The backend failed to read or decode the object.
    #[error("object {oid} could not be read")]
    Corrupt {
        oid: ObjectId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    pub fn corrupt(oid: &ObjectId, source: anyhow::Error) -> Self {
        StoreError::Corrupt {
            oid: oid.clone(),
            source: source.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::MissingObject(_))
    }
}

pub trait ObjectStore: Sync {
    /// Entries of the tree behind `oid`
    ///
    /// A commit id resolves to its root tree.
    fn load_tree(&self, oid: &ObjectId) -> StoreResult<TreeEntryMap>;

    fn load_blob(&self, oid: &ObjectId) -> StoreResult<Blob>;
}
