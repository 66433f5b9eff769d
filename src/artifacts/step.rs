//! `--step` parsing and fork-point arithmetic.
//!
//! A step moves the fork point along the tracking branch's linear history:
//! `MAX` jumps to the tip, a positive count walks forward, a negative count
//! walks backward, and `0` keeps the current base. Walking past either end
//! clamps rather than fails; the clamp is surfaced as an explicit outcome
//! variant so the caller can warn. A base that is not in the history at all
//! is an error, since positions are undefined from there.

use crate::artifacts::commit_id::CommitId;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Jump to the tip of the tracking branch.
    Max,
    /// Move by a signed number of commits; `By(0)` keeps the current base.
    By(i64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid step '{0}': expected 'MAX', '0', or an integer")]
pub struct StepParseError(String);

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "MAX" {
            return Ok(Step::Max);
        }
        s.parse::<i64>()
            .map(Step::By)
            .map_err(|_| StepParseError(s.to_string()))
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Max => write!(f, "MAX"),
            Step::By(n) => write!(f, "{n}"),
        }
    }
}

/// Where a step landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Landed exactly the requested number of commits away.
    Exact(CommitId),
    /// The requested count ran past the newest commit; clamped to the tip.
    ClampedToTip(CommitId),
    /// The requested count ran past the oldest commit; clamped to the root.
    ClampedToRoot(CommitId),
}

impl StepOutcome {
    pub fn commit(&self) -> &CommitId {
        match self {
            StepOutcome::Exact(commit)
            | StepOutcome::ClampedToTip(commit)
            | StepOutcome::ClampedToRoot(commit) => commit,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("base commit {0} is not in the tracking branch history")]
    BaseNotInHistory(CommitId),
}

/// Move `count` positions from `base` along `history` (oldest first).
pub fn advance(
    history: &[CommitId],
    base: &CommitId,
    count: i64,
) -> Result<StepOutcome, StepError> {
    let origin = history
        .iter()
        .position(|commit| commit == base)
        .ok_or_else(|| StepError::BaseNotInHistory(base.clone()))?;

    let target = origin as i64 + count;

    if target < 0 {
        // history is nonempty: base was found in it
        Ok(StepOutcome::ClampedToRoot(history[0].clone()))
    } else if target as usize >= history.len() {
        Ok(StepOutcome::ClampedToTip(
            history[history.len() - 1].clone(),
        ))
    } else {
        Ok(StepOutcome::Exact(history[target as usize].clone()))
    }
}
