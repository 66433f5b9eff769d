//! Upstream commit resolver.
//!
//! The tracked project publishes which upstream commit it depends on as an
//! entry in its repository contents (a submodule's `sha` in the GitHub
//! contents API). One unauthenticated GET, one JSON array, one lookup.

use crate::artifacts::commit_id::CommitId;
use crate::error::{Result, SyncError};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("sync-base/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry of a contents listing. Other fields in the response are
/// ignored.
#[derive(Debug, Deserialize)]
pub struct ContentsEntry {
    pub name: String,
    pub sha: String,
}

/// Fetch the commit the tracked project currently depends on.
///
/// Fails on transport errors, non-success status codes, undecodable bodies,
/// and when no entry carries the requested name.
pub fn resolve_tracked_commit(api_url: &str, entry_name: &str) -> Result<CommitId> {
    // GitHub rejects requests without a User-Agent
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let entries: Vec<ContentsEntry> = client
        .get(api_url)
        .send()?
        .error_for_status()?
        .json()?;

    let entry = entries
        .into_iter()
        .find(|entry| entry.name == entry_name)
        .ok_or_else(|| SyncError::NotFound {
            what: format!("entry '{entry_name}' in the contents listing"),
        })?;

    CommitId::try_parse(entry.sha).map_err(SyncError::Git)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LLVM_SHA: &str = "1234567890abcdef1234567890abcdef12345678";

    fn listing_body() -> String {
        serde_json::json!([
            {"name": ".github", "sha": "a".repeat(40), "type": "dir"},
            {"name": "llvm", "sha": LLVM_SHA, "type": "dir"},
            {"name": "README.md", "sha": "b".repeat(40), "type": "file"}
        ])
        .to_string()
    }

    #[test]
    fn test_resolves_named_entry() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/contents/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(listing_body())
            .create();

        let url = format!("{}/contents/", server.url());
        let commit = resolve_tracked_commit(&url, "llvm").unwrap();

        mock.assert();
        assert_eq!(commit.as_ref(), LLVM_SHA);
    }

    #[test]
    fn test_missing_entry_is_not_found() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/contents/")
            .with_status(200)
            .with_body(listing_body())
            .create();

        let url = format!("{}/contents/", server.url());
        let err = resolve_tracked_commit(&url, "mlir").unwrap_err();

        assert!(matches!(err, SyncError::NotFound { .. }));
    }

    #[test]
    fn test_server_error_is_fatal() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/contents/")
            .with_status(502)
            .create();

        let url = format!("{}/contents/", server.url());
        let err = resolve_tracked_commit(&url, "llvm").unwrap_err();

        assert!(matches!(err, SyncError::Api(_)));
    }

    #[test]
    fn test_undecodable_body_is_fatal() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/contents/")
            .with_status(200)
            .with_body("not json")
            .create();

        let url = format!("{}/contents/", server.url());
        let err = resolve_tracked_commit(&url, "llvm").unwrap_err();

        assert!(matches!(err, SyncError::Api(_)));
    }
}
