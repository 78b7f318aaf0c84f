//! Data structures and algorithms
//!
//! - `core`: shared utilities (pager writer)
//! - `database`: tree entry types
//! - `diff`: tree and blob diffing, collections and pagination
//! - `notes`: diff note anchoring
//! - `objects`: object types (blob, tree, commit) and the object store seam

pub mod core;
pub mod database;
pub mod diff;
pub mod notes;
pub mod objects;
