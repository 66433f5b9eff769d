use crate::areas::repository::Repository;
use crate::artifacts::commit_id::CommitId;
use crate::artifacts::patches::PatchSet;
use crate::error::{Result, SyncError};
use chrono::Local;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Both bases must be ancestors of the tracking branch before anything
    /// destructive starts; the step arithmetic and the reset are undefined
    /// otherwise.
    pub fn verify_bases(&self, old_base: &CommitId, new_base: &CommitId) -> Result<()> {
        let config = self.config();
        writeln!(
            self.writer(),
            "Verifying commits exist in {}...",
            config.tracking_branch
        )?;

        for (label, commit) in [("old base", old_base), ("new base", new_base)] {
            if !self
                .git()
                .is_ancestor(commit.as_ref(), &config.tracking_branch)?
            {
                return Err(SyncError::NotFound {
                    what: format!("{label} commit {commit} in {}", config.tracking_branch),
                });
            }
            writeln!(
                self.writer(),
                "{} {} {} found in {}",
                "✓".green(),
                label,
                commit.short(),
                config.tracking_branch
            )?;
        }

        Ok(())
    }

    /// Reset the branch to `new_base` and reapply the snapshotted patches in
    /// order, under the protection of a timestamped backup branch.
    ///
    /// Recovery is all-or-nothing: any failure after the reset aborts the
    /// in-progress apply and force-resets the branch back to the backup, so
    /// the branch is left either fully rebased or exactly as it was. The
    /// backup branch is retained either way.
    pub fn rebase_onto(&self, new_base: &CommitId, patches: &PatchSet) -> Result<()> {
        let config = self.config();
        writeln!(
            self.writer(),
            "\nRebasing {} to {}...",
            config.branch,
            new_base.short()
        )?;

        let backup = format!(
            "{}-backup-{}",
            config.branch,
            Local::now().format("%Y%m%d-%H%M%S")
        );
        self.git().create_branch(&backup)?;
        writeln!(self.writer(), "{} Created backup branch: {backup}", "✓".green())?;

        if let Err(err) = self.apply_patches(new_base, patches, &backup) {
            writeln!(
                self.writer(),
                "\nERROR: rebase failed, restoring {} from backup branch {backup}...",
                config.branch
            )?;
            self.restore_from_backup(&backup)?;
            writeln!(
                self.writer(),
                "{} Restored {} from {backup}",
                "✓".green(),
                config.branch
            )?;
            return Err(err);
        }

        writeln!(
            self.writer(),
            "\n{} Successfully rebased {} to {}",
            "✓".green(),
            config.branch,
            new_base.short()
        )?;
        writeln!(
            self.writer(),
            "{} Applied {} patches",
            "✓".green(),
            patches.len()
        )?;
        writeln!(
            self.writer(),
            "\nYou can delete the backup branch with: git branch -D {backup}"
        )?;

        Ok(())
    }

    fn apply_patches(
        &self,
        new_base: &CommitId,
        patches: &PatchSet,
        backup: &str,
    ) -> Result<()> {
        let config = self.config();

        self.git().reset_hard(new_base)?;
        writeln!(
            self.writer(),
            "{} Reset {} to {}",
            "✓".green(),
            config.branch,
            new_base.short()
        )?;

        writeln!(self.writer(), "\nApplying {} patches...", patches.len())?;
        for (index, patch) in patches.files().iter().enumerate() {
            writeln!(
                self.writer(),
                "Applying patch {}/{}: {}",
                index + 1,
                patches.len(),
                patch.file_name()
            )?;
            self.git()
                .apply_mailbox(&patch.path)
                .map_err(|source| SyncError::PatchFailed {
                    patch: patch.file_name().to_string(),
                    backup_branch: backup.to_string(),
                    source,
                })?;
        }

        Ok(())
    }

    fn restore_from_backup(&self, backup: &str) -> Result<()> {
        let config = self.config();

        // a half-applied mailbox blocks the checkout
        self.git().abort_mailbox()?;
        self.git().checkout(backup)?;
        self.git().force_branch(&config.branch, backup)?;
        self.git().checkout(&config.branch)?;

        Ok(())
    }
}
