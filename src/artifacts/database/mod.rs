//! Database entry types
//!
//! Types used when reading tree listings from the object store. A database entry
//! is a reference to an object together with the mode it was recorded under.

pub mod database_entry;
pub mod entry_mode;
