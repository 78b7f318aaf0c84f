use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::store::{ObjectStore, StoreError, StoreResult};
use crate::artifacts::objects::tree::{Tree, TreeBuilder, TreeEntryMap};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Loose object database, `objects/<xx>/<38 hex chars>` zlib-compressed files
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        // objects are immutable, an existing file already holds this content
        if !object_path.exists() {
            let object_dir = object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?;
            std::fs::create_dir_all(object_dir).context(format!(
                "Unable to create object directory {}",
                object_dir.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    /// Store every tree of `builder`, children first
    pub fn store_trees(&self, builder: &TreeBuilder) -> anyhow::Result<ObjectId> {
        builder.write(&mut |tree: &Tree| self.store(tree).map(|_| ()))
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> StoreResult<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        let object = match object_type {
            ObjectType::Blob => {
                Blob::deserialize(object_reader).map(|blob| ObjectBox::Blob(Box::new(blob)))
            }
            ObjectType::Tree => {
                Tree::deserialize(object_reader).map(|tree| ObjectBox::Tree(Box::new(tree)))
            }
            ObjectType::Commit => Commit::deserialize(object_reader)
                .map(|commit| ObjectBox::Commit(Box::new(commit))),
        };

        object.map_err(|e| StoreError::corrupt(object_id, e))
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> StoreResult<(ObjectType, impl BufRead)> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(StoreError::MissingObject(object_id.clone()));
        }

        let object_content = self
            .read_object(object_path)
            .map_err(|e| StoreError::corrupt(object_id, e))?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)
            .map_err(|e| StoreError::corrupt(object_id, e))?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

impl ObjectStore for Database {
    fn load_tree(&self, oid: &ObjectId) -> StoreResult<TreeEntryMap> {
        match self.parse_object(oid)? {
            ObjectBox::Tree(tree) => Ok(tree.into_entries()),
            ObjectBox::Commit(commit) => self.load_tree(commit.tree_oid()),
            other => Err(StoreError::UnexpectedType {
                oid: oid.clone(),
                expected: ObjectType::Tree,
                actual: other.object_type(),
            }),
        }
    }

    fn load_blob(&self, oid: &ObjectId) -> StoreResult<Blob> {
        match self.parse_object(oid)? {
            ObjectBox::Blob(blob) => Ok(*blob),
            other => Err(StoreError::UnexpectedType {
                oid: oid.clone(),
                expected: ObjectType::Blob,
                actual: other.object_type(),
            }),
        }
    }
}
