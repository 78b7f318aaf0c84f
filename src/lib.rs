//! Merge request diff engine
//!
//! Builds the per-file diff between the two revisions of a merge request,
//! caches it per revision pair and serves it whole, one path at a time or in
//! pages.
//!
//! - `areas`: stateful components (object database, cache, configuration)
//! - `artifacts`: data structures and algorithms
//! - `commands`: the diffs request modes and their rendering
//! - `errors`: error taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
