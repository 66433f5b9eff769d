//! Commit identifier (SHA-1 hash)
//!
//! Commit IDs are 40-character hexadecimal strings. They come from two
//! places — `git rev-parse`/`rev-list` output and the contents API's `sha`
//! field — and both are validated on the way in.
//!
//! ## Format
//!
//! - Full: 40 hex characters
//! - Short: first 8 characters, used for all human-facing output

const COMMIT_ID_LENGTH: usize = 40;
const SHORT_LENGTH: usize = 8;

/// Validated commit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Parse and validate a commit ID from a string.
    ///
    /// Rejects anything that is not exactly 40 hex characters.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != COMMIT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid commit ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid commit ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Abbreviated form for display and patch file names.
    pub fn short(&self) -> &str {
        &self.0[..SHORT_LENGTH]
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
