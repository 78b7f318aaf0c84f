//! Stateful components of the diff service
//!
//! - `config`: diffs settings and the batch loading gate
//! - `database`: loose object database, the default object store
//! - `diff_cache`: built collections per revision pair
//! - `merge_requests`: merge request lookup by project and iid
//! - `repository`: owner of the above, entry point of the commands

pub mod config;
pub mod database;
pub mod diff_cache;
pub mod merge_requests;
pub mod repository;
