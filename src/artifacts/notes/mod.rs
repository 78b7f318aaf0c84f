//! Diff note anchoring
//!
//! - `note_anchor`: stored coordinates of a note within a diff
//! - `position_resolver`: whether a new note can be anchored, and its defaults

pub mod note_anchor;
pub mod position_resolver;
