//! Built collections, one per revision pair
//!
//! Each pair owns a slot with its own build lock. The first caller for a pair
//! builds while holding that lock; concurrent callers for the same pair wait on
//! it and then read what was stored. Once a slot is filled, reads go through
//! the `OnceLock` and never touch the build lock. Other pairs are unaffected by
//! a build in progress.
//!
//! Failed builds leave the slot empty, so the next caller tries again. An
//! empty slot nobody else is waiting on is dropped from the map.
//! Eviction is driven from outside through `evict` and `clear`.

use crate::artifacts::diff::file_collection::DiffFileCollection;
use crate::artifacts::diff::revision_pair::RevisionPair;
use crate::errors::DiffResult;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

#[derive(Default)]
struct Slot {
    ready: OnceLock<Arc<DiffFileCollection>>,
    build_lock: Mutex<()>,
}

#[derive(Default)]
pub struct DiffCache {
    slots: RwLock<HashMap<RevisionPair, Arc<Slot>>>,
}

impl DiffCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build<F>(&self, pair: &RevisionPair, build: F) -> DiffResult<Arc<DiffFileCollection>>
    where
        F: FnOnce() -> DiffResult<DiffFileCollection>,
    {
        let slot = self.slot(pair);
        if let Some(collection) = slot.ready.get() {
            tracing::debug!(%pair, "diff cache hit");
            return Ok(collection.clone());
        }

        let _guard = slot.build_lock.lock();
        if let Some(collection) = slot.ready.get() {
            tracing::debug!(%pair, "diff built by a concurrent request");
            return Ok(collection.clone());
        }

        tracing::debug!(%pair, "diff cache miss, building");
        let collection = match build() {
            Ok(collection) => Arc::new(collection),
            Err(error) => {
                self.discard_unused(pair, &slot);
                return Err(error);
            }
        };
        tracing::debug!(%pair, files = collection.len(), "diff built");

        Ok(slot.ready.get_or_init(|| collection).clone())
    }

    /// The stored collection, without building it
    pub fn get(&self, pair: &RevisionPair) -> Option<Arc<DiffFileCollection>> {
        self.slots
            .read()
            .get(pair)
            .and_then(|slot| slot.ready.get().cloned())
    }

    pub fn evict(&self, pair: &RevisionPair) -> bool {
        self.slots.write().remove(pair).is_some()
    }

    pub fn clear(&self) {
        self.slots.write().clear();
    }

    fn slot(&self, pair: &RevisionPair) -> Arc<Slot> {
        if let Some(slot) = self.slots.read().get(pair) {
            return slot.clone();
        }

        self.slots.write().entry(pair.clone()).or_default().clone()
    }

    /// Drop `slot` when it is empty and only the map and the caller hold it
    fn discard_unused(&self, pair: &RevisionPair, slot: &Arc<Slot>) {
        let mut slots = self.slots.write();
        let unused = slots.get(pair).is_some_and(|stored| {
            Arc::ptr_eq(stored, slot) && stored.ready.get().is_none() && Arc::strong_count(slot) == 2
        });

        if unused {
            slots.remove(pair);
        }
    }
}
