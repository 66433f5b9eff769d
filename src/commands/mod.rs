//! Sync operations
//!
//! Each operation is an `impl Repository` block in its own file, composed by
//! `sync` into one strictly linear run:
//!
//! - `check`: branch, tracking-ref, remote-URL and clean-tree preconditions
//! - `remote`: upstream remote bookkeeping, fetch, conditional push
//! - `rebase`: backup branch, hard reset, ordered patch reapplication
//! - `report`: fork point position versus the reference and the tracking tip
//! - `sync`: the orchestrator

pub mod check;
pub mod rebase;
pub mod remote;
pub mod report;
pub mod sync;
