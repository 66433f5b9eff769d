use crate::areas::repository::Repository;
use crate::artifacts::commit_id::CommitId;
use crate::artifacts::report::Position;
use crate::error::Result;
use std::io::Write;

impl Repository {
    /// Print where the fork point sits relative to the tracked reference
    /// commit and to the tracking branch's current tip.
    pub fn report_fork_position(
        &self,
        fork: &CommitId,
        reference: &CommitId,
        local_commits: usize,
    ) -> Result<()> {
        let config = self.config();
        let latest = self.git().rev_parse(&config.tracking_branch)?;

        let reference_position =
            Position::between(self.git(), fork, reference, &config.tracking_branch)?;
        let latest_position =
            Position::between(self.git(), fork, &latest, &config.tracking_branch)?;

        writeln!(self.writer(), "\n=== Fork Point Position Report ===")?;
        writeln!(
            self.writer(),
            "Current fork point:  {} (with {local_commits} local commits)",
            fork.short()
        )?;
        writeln!(
            self.writer(),
            "Tracked reference:   {} {}",
            reference.short(),
            reference_position.label("same as current fork point")
        )?;
        writeln!(
            self.writer(),
            "Latest {}:    {} {}",
            config.tracking_branch,
            latest.short(),
            latest_position.label("at latest")
        )?;

        Ok(())
    }
}
