use crate::areas::repository::Repository;
use crate::artifacts::commit_id::CommitId;
use crate::error::{Result, SyncError};

/// The common ancestor of the local branch and the tracking branch, together
/// with the local-only commits sitting on top of it, oldest first.
#[derive(Debug, Clone)]
pub struct ForkPoint {
    pub base: CommitId,
    pub local_commits: Vec<CommitId>,
}

impl ForkPoint {
    pub fn find(repository: &Repository) -> Result<Self> {
        let config = repository.config();

        let base = repository
            .git()
            .merge_base(&config.branch, &config.tracking_branch)?
            .ok_or_else(|| SyncError::NotFound {
                what: format!(
                    "a merge base between {} and {}",
                    config.branch, config.tracking_branch
                ),
            })?;

        let local_commits = repository
            .git()
            .commits_since(base.as_ref(), &config.branch)?;

        Ok(ForkPoint {
            base,
            local_commits,
        })
    }
}
