//! Command implementations
//!
//! - `diffs`: the three diffs request modes, implemented on `Repository`
//! - `render`: terminal output of their responses
//!
//! Commands return tagged responses; rendering is kept apart so that other
//! adapters can format the same responses their own way.

pub mod diffs;
pub mod render;
