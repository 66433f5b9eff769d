//! sync-base: keep a fork's `main` branch re-based on a moving upstream.
//!
//! The tool maintains two refs in one repository: the local branch carrying
//! downstream patches, and a tracking branch mirroring the upstream project's
//! mainline. One run finds the current fork point, picks a new base commit
//! (from a tracked reference or an explicit `--step`), snapshots the local
//! commits as patches, hard-resets the branch, and reapplies the patches in
//! order, with a backup branch guarding the whole operation.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod error;

pub use error::{Result, SyncError};
