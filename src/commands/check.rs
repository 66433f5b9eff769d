use crate::areas::repository::Repository;
use crate::error::{Result, SyncError};
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Ensure the run starts from the expected place: on the configured
    /// branch (checking it out if not), tracking the configured origin ref,
    /// with an origin URL containing the marker when one is configured.
    pub fn check_branch(&self) -> Result<()> {
        let config = self.config();
        let current = self.git().current_branch()?;

        if current != config.branch {
            writeln!(
                self.writer(),
                "Current branch is '{current}', switching to '{}'...",
                config.branch
            )?;
            self.git().checkout(&config.branch)?;
        }

        let expected = config.expected_tracking_ref();
        match self.git().tracking_ref()? {
            Some(tracking) if tracking == expected => {}
            tracking => {
                return Err(SyncError::Precondition {
                    message: format!(
                        "{} is not tracking {expected} (currently: {})",
                        config.branch,
                        tracking.as_deref().unwrap_or("nothing")
                    ),
                });
            }
        }

        if let Some(marker) = &config.origin_marker {
            let url = self.git().remote_url(&config.origin_remote)?;
            match url {
                Some(url) if url.contains(marker.as_str()) => {}
                url => {
                    return Err(SyncError::Precondition {
                        message: format!(
                            "{} URL does not contain '{marker}': {}",
                            config.origin_remote,
                            url.as_deref().unwrap_or("<unset>")
                        ),
                    });
                }
            }
        }

        writeln!(
            self.writer(),
            "{} On {} tracking {expected}",
            "✓".green(),
            config.branch
        )?;

        Ok(())
    }

    /// Fatal when the working tree carries staged, unstaged, or untracked
    /// changes. Called right before the first destructive step.
    pub fn ensure_clean(&self) -> Result<()> {
        if self.git().is_working_tree_dirty()? {
            return Err(SyncError::Precondition {
                message: "working tree has uncommitted changes; commit or stash them first"
                    .to_string(),
            });
        }

        Ok(())
    }
}
