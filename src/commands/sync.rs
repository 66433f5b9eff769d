use crate::areas::repository::Repository;
use crate::artifacts::commit_id::CommitId;
use crate::artifacts::fork_point::ForkPoint;
use crate::artifacts::patches::PatchSet;
use crate::artifacts::step::{self, Step, StepError, StepOutcome};
use crate::artifacts::upstream;
use crate::error::{Result, SyncError};
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// One full run: validate, refresh the tracking branch, pick a target
    /// base, and when it differs from the current fork point, carry the
    /// local commits over to it.
    pub fn sync(&self, step: Option<Step>, reference_override: Option<CommitId>) -> Result<()> {
        let config = self.config();
        writeln!(self.writer(), "=== Base Synchronization ===\n")?;

        self.check_branch()?;
        self.ensure_upstream()?;

        let reference = match reference_override {
            Some(commit) => {
                writeln!(
                    self.writer(),
                    "{} Using provided reference commit: {}",
                    "✓".green(),
                    commit.short()
                )?;
                commit
            }
            None => {
                let commit = upstream::resolve_tracked_commit(&config.api_url, &config.api_entry)?;
                writeln!(
                    self.writer(),
                    "{} '{}' is tracking commit: {commit}",
                    "✓".green(),
                    config.api_entry
                )?;
                commit
            }
        };

        let fork = ForkPoint::find(self)?;
        writeln!(self.writer(), "{} Found fork point: {}", "✓".green(), fork.base)?;
        writeln!(
            self.writer(),
            "{} Found {} local commits on {}",
            "✓".green(),
            fork.local_commits.len(),
            config.branch
        )?;

        let new_base = match step {
            Some(step) => {
                let target = self.calculate_target_commit(&fork.base, step)?;
                writeln!(
                    self.writer(),
                    "\n{} Using --step {step}: target commit is {}",
                    "✓".green(),
                    target.short()
                )?;
                target
            }
            None => {
                writeln!(
                    self.writer(),
                    "\n{} Using tracked reference commit as target: {}",
                    "✓".green(),
                    reference.short()
                )?;
                reference.clone()
            }
        };

        if new_base == fork.base {
            writeln!(
                self.writer(),
                "\n{} {} is already at target commit {}",
                "✓".green(),
                config.branch,
                new_base.short()
            )?;
            self.report_fork_position(&new_base, &reference, fork.local_commits.len())?;
            return Ok(());
        }

        self.ensure_clean()?;

        writeln!(self.writer(), "\nSaving patches...")?;
        let patches = PatchSet::snapshot(self.git(), &fork.local_commits)?;
        writeln!(
            self.writer(),
            "{} Saved {} patches to {}",
            "✓".green(),
            patches.len(),
            patches.dir_path().display()
        )?;

        self.verify_bases(&fork.base, &new_base)?;
        self.rebase_onto(&new_base, &patches)?;
        self.report_fork_position(&new_base, &reference, fork.local_commits.len())?;

        Ok(())
    }

    /// Resolve a `--step` into a target commit on the tracking branch.
    ///
    /// `MAX` is the tip and `0` the current base, both without loading
    /// history. Signed counts walk the full tracking history from the base;
    /// a clamp is a warning, a base missing from the history is fatal.
    pub fn calculate_target_commit(&self, old_base: &CommitId, step: Step) -> Result<CommitId> {
        let config = self.config();

        let count = match step {
            Step::Max => return Ok(self.git().rev_parse(&config.tracking_branch)?),
            Step::By(0) => return Ok(old_base.clone()),
            Step::By(count) => count,
        };

        let history = self.git().full_history(&config.tracking_branch)?;

        match step::advance(&history, old_base, count) {
            Ok(StepOutcome::Exact(commit)) => Ok(commit),
            Ok(StepOutcome::ClampedToTip(commit)) => {
                writeln!(
                    self.writer(),
                    "{} step {count} exceeds the available commits; using the latest",
                    "Warning:".yellow()
                )?;
                Ok(commit)
            }
            Ok(StepOutcome::ClampedToRoot(commit)) => {
                writeln!(
                    self.writer(),
                    "{} cannot go back {} commits; using the oldest available",
                    "Warning:".yellow(),
                    count.unsigned_abs()
                )?;
                Ok(commit)
            }
            Err(StepError::BaseNotInHistory(commit)) => Err(SyncError::NotFound {
                what: format!("current base {commit} in {}", config.tracking_branch),
            }),
        }
    }
}
