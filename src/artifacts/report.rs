//! Relative position of the fork point versus a reference commit.

use crate::areas::git::Git;
use crate::artifacts::commit_id::CommitId;

/// How the fork point relates to one reference commit along the tracking
/// branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    Same,
    /// Fork point is an ancestor of the reference, this many commits behind.
    Before(usize),
    /// Reference is an ancestor of the fork point, this many commits back.
    After(usize),
    /// Neither is an ancestor of the other.
    Diverged,
}

impl Position {
    pub fn between(
        git: &Git,
        fork: &CommitId,
        reference: &CommitId,
        branch: &str,
    ) -> anyhow::Result<Self> {
        if fork == reference {
            return Ok(Position::Same);
        }

        if git.is_ancestor(fork.as_ref(), reference.as_ref())? {
            let commits = git.commits_between(fork.as_ref(), reference.as_ref(), branch)?;
            return Ok(Position::Before(commits.len()));
        }

        if git.is_ancestor(reference.as_ref(), fork.as_ref())? {
            let commits = git.commits_between(reference.as_ref(), fork.as_ref(), branch)?;
            return Ok(Position::After(commits.len()));
        }

        Ok(Position::Diverged)
    }

    /// Parenthesized label for the report, with per-line wording for the
    /// equal case.
    pub fn label(&self, when_same: &str) -> String {
        match self {
            Position::Same => format!("({when_same})"),
            Position::Before(count) => format!("(+{count} commits to current)"),
            Position::After(count) => format!("(-{count} commits to current)"),
            Position::Diverged => "(on different branch)".to_string(),
        }
    }
}
