//! Core repository components
//!
//! This module contains the building blocks every operation runs through:
//!
//! - `git`: command runner wrapping `git` subprocess invocations
//! - `repository`: explicit repository handle plus the sync configuration

pub mod git;
pub mod repository;
