//! Error model for sync operations.
//!
//! Every operation returns a [`SyncError`] kind instead of exiting on the
//! spot, so the binary decides uniformly how a failure maps to process exit.

use thiserror::Error;

pub type Result<T, E = SyncError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum SyncError {
    /// A precondition does not hold (wrong tracking ref, wrong remote URL,
    /// dirty working tree). Raised before any mutation.
    #[error("{message}")]
    Precondition { message: String },

    /// Something that must exist in the repository or the API listing does
    /// not (no merge base, base commit outside the tracking history, API
    /// entry missing).
    #[error("could not find {what}")]
    NotFound { what: String },

    /// Transport or decode failure while querying the contents API.
    #[error("contents API request failed: {0}")]
    Api(#[from] reqwest::Error),

    /// A patch did not apply cleanly. The branch has already been restored
    /// from the backup by the time this is returned.
    #[error("failed to apply patch {patch}; branch was restored from backup '{backup_branch}'")]
    PatchFailed {
        patch: String,
        backup_branch: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A git subcommand failed in a way no more specific kind covers.
    #[error(transparent)]
    Git(#[from] anyhow::Error),
}
