use crate::areas::repository::Repository;
use crate::error::Result;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Make sure the upstream remote exists, refresh the tracking branch
    /// from its mainline, and mirror the new tip to origin when it moved.
    ///
    /// The push is best-effort: a failure is reported as a warning with the
    /// manual command, never as an abort.
    pub fn ensure_upstream(&self) -> Result<()> {
        let config = self.config();

        if !self.git().remotes()?.contains(&config.upstream_remote) {
            writeln!(self.writer(), "Adding {} remote...", config.upstream_remote)?;
            self.git()
                .add_remote(&config.upstream_remote, &config.upstream_url)?;
        }

        let old_tip = self.git().try_rev_parse(&config.tracking_branch)?;

        writeln!(
            self.writer(),
            "Fetching {}/{}...",
            config.upstream_remote,
            config.upstream_mainline
        )?;
        self.git().fetch_into(
            &config.upstream_remote,
            &config.upstream_mainline,
            &config.tracking_branch,
        )?;

        let new_tip = self.git().rev_parse(&config.tracking_branch)?;

        if old_tip.as_ref() == Some(&new_tip) {
            writeln!(
                self.writer(),
                "{} {} is already up to date",
                "✓".green(),
                config.tracking_branch
            )?;
            return Ok(());
        }

        let refspec = format!("{0}:{0}", config.tracking_branch);
        writeln!(
            self.writer(),
            "Pushing updated {} to {}...",
            config.tracking_branch,
            config.origin_remote
        )?;
        match self.git().push(&config.origin_remote, &refspec) {
            Ok(()) => {
                writeln!(
                    self.writer(),
                    "{} Pushed {} to {}/{1}",
                    "✓".green(),
                    config.tracking_branch,
                    config.origin_remote
                )?;
            }
            Err(err) => {
                writeln!(
                    self.writer(),
                    "{} failed to push {} to {}: {err}",
                    "Warning:".yellow(),
                    config.tracking_branch,
                    config.origin_remote
                )?;
                writeln!(
                    self.writer(),
                    "You may need to run: git push {} {refspec}",
                    config.origin_remote
                )?;
            }
        }

        Ok(())
    }
}
