//! Blob object
//!
//! Blobs store file content. They carry no metadata: names and modes live in
//! the trees that point at them.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Number of leading bytes inspected when sniffing for binary content
const BINARY_SNIFF_LENGTH: usize = 8000;

/// Blob object holding raw file content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// A blob is binary when a NUL byte shows up in its first 8000 bytes
    pub fn is_binary(&self) -> bool {
        self.content
            .iter()
            .take(BINARY_SNIFF_LENGTH)
            .any(|byte| *byte == 0)
    }

    /// Content split into lines, without line terminators
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected, binary blobs
    /// never reach this point.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.content)
            .lines()
            .map(|line| line.to_string())
            .collect()
    }
}

impl From<&str> for Blob {
    fn from(content: &str) -> Self {
        Blob::new(Bytes::copy_from_slice(content.as_bytes()))
    }
}

impl Packable for Blob {
    fn serialize_content(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(content.into()))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
