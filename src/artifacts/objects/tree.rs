//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs),
//! subdirectories (other trees) and submodule pointers (gitlinks), along with
//! their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! ## Tree Building
//!
//! Trees are read from the object store when diffing. `TreeBuilder` goes the
//! other way and turns a flat list of paths into nested trees, children first,
//! which is how fixtures and imports populate a store.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::database::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Component, Path};

pub type TreeEntryMap = BTreeMap<String, DatabaseEntry>;

/// Tree object representing a directory snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: TreeEntryMap,
}

impl Tree {
    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> TreeEntryMap {
        self.entries
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: DatabaseEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Entries in the order they are serialized
    ///
    /// Directories sort as if their name ended with `/`, which keeps object ids
    /// compatible with other implementations of the format.
    fn serialization_order(&self) -> Vec<(&String, &DatabaseEntry)> {
        let mut entries = self.entries.iter().collect::<Vec<_>>();
        entries.sort_by_cached_key(|(name, entry)| {
            let mut key = name.as_bytes().to_vec();
            if entry.is_tree() {
                key.push(b'/');
            }
            key
        });
        entries
    }
}

impl Packable for Tree {
    fn serialize_content(&self) -> anyhow::Result<Bytes> {
        let mut content = Vec::new();

        for (name, entry) in self.serialization_order() {
            let header = format!("{:o} {}", entry.mode.as_u32(), name);
            content.write_all(header.as_bytes())?;
            content.push(0);
            entry.oid.write_h40_to(&mut content)?;
        }

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::from_octal_str(mode_str)?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid =
                ObjectId::read_h40_from(&mut reader).context("unexpected EOF in object id")?;

            entries.insert(name, DatabaseEntry::new(oid, mode));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}

/// Nested directory under construction
#[derive(Debug, Clone)]
enum PendingEntry {
    Leaf(DatabaseEntry),
    Directory(TreeBuilder),
}

/// Builds nested trees from flat `path -> entry` pairs
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    entries: BTreeMap<String, PendingEntry>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, symlink or submodule pointer at `path`
    ///
    /// Intermediate directories are created as needed.
    pub fn add(&mut self, path: &Path, entry: DatabaseEntry) -> anyhow::Result<()> {
        let components = path
            .components()
            .map(|component| match component {
                Component::Normal(name) => name
                    .to_str()
                    .map(|name| name.to_string())
                    .context(format!("Invalid path component in {}", path.display())),
                _ => Err(anyhow::anyhow!("Invalid tree path {}", path.display())),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        self.add_components(&components, entry)
    }

    fn add_components(&mut self, components: &[String], entry: DatabaseEntry) -> anyhow::Result<()> {
        match components {
            [] => Err(anyhow::anyhow!("Empty tree path")),
            [name] => {
                self.entries.insert(name.clone(), PendingEntry::Leaf(entry));
                Ok(())
            }
            [parent, rest @ ..] => {
                let pending = self
                    .entries
                    .entry(parent.clone())
                    .or_insert_with(|| PendingEntry::Directory(TreeBuilder::new()));

                match pending {
                    PendingEntry::Directory(builder) => builder.add_components(rest, entry),
                    PendingEntry::Leaf(_) => Err(anyhow::anyhow!(
                        "Cannot nest entries under file {parent}"
                    )),
                }
            }
        }
    }

    /// Materialize the trees post-order, handing each one to `store`
    ///
    /// Child ids must be known before their parent can be serialized, so every
    /// subtree reaches `store` before the tree that contains it.
    ///
    /// # Returns
    ///
    /// The object id of the root tree
    pub fn write<F>(&self, store: &mut F) -> anyhow::Result<ObjectId>
    where
        F: FnMut(&Tree) -> anyhow::Result<()>,
    {
        let mut tree = Tree::default();

        for (name, pending) in &self.entries {
            let entry = match pending {
                PendingEntry::Leaf(entry) => entry.clone(),
                PendingEntry::Directory(builder) => {
                    DatabaseEntry::new(builder.write(store)?, EntryMode::Directory)
                }
            };
            tree.insert(name.clone(), entry);
        }

        store(&tree)?;
        tree.object_id()
    }
}
