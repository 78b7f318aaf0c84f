//! Object model of the versioned tree
//!
//! Everything the diff engine reads is a content addressed object identified by
//! a SHA-1 hash:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata pointing at a root tree
//!
//! All objects share the loose object format `<type> <size>\0<content>`.
//! The `store` module defines the seam through which the diff engine reads them.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod store;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated object ID used in patch headers
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
