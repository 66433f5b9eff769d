//! Sync data types and algorithms
//!
//! This module contains the values one run passes between operations:
//!
//! - `commit_id`: validated commit hashes
//! - `step`: `--step` parsing and fork-point arithmetic over linear history
//! - `fork_point`: merge base plus the ordered local-only commits
//! - `upstream`: resolver for the commit the tracked project depends on
//! - `patches`: run-scoped patch snapshots of the local commits
//! - `report`: relative position of the fork point versus a reference

pub mod commit_id;
pub mod fork_point;
pub mod patches;
pub mod report;
pub mod step;
pub mod upstream;
