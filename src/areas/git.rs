//! Git command runner
//!
//! All version control work is delegated to the `git` binary. Every
//! invocation goes through [`Git::run`], which captures output and turns a
//! nonzero exit into an error carrying the full command line and stderr.
//! Probes that are allowed to fail (ancestry checks, optional refs) go
//! through [`Git::try_run`] or [`Git::succeeds`] instead.

use crate::artifacts::commit_id::CommitId;
use anyhow::{Context, bail};
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::rc::Rc;

pub struct Git {
    work_dir: Box<Path>,
    echo: Rc<RefCell<Box<dyn Write>>>,
}

impl Git {
    /// `echo` receives one `Running: git ...` line per invocation; it is
    /// the same writer the repository's other output goes through.
    pub fn new(work_dir: &Path, echo: Rc<RefCell<Box<dyn Write>>>) -> Self {
        Git {
            work_dir: work_dir.into(),
            echo,
        }
    }

    /// Run `git` with the given arguments, echoing the command line.
    ///
    /// Returns trimmed stdout on success. A nonzero exit becomes an error
    /// that includes the arguments, the exit status, and trimmed stderr.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        writeln!(self.echo.borrow_mut(), "Running: git {}", args.join(" "))?;
        let output = self.output(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            bail!("git {} ({}): {}", args.join(" "), output.status, stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run `git`, mapping a nonzero exit to `None` instead of an error.
    /// Used for lookups where absence is an expected answer.
    pub fn try_run(&self, args: &[&str]) -> anyhow::Result<Option<String>> {
        let output = self.output(args)?;

        if !output.status.success() {
            return Ok(None);
        }

        Ok(Some(
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
        ))
    }

    /// Run `git` purely for its exit status.
    pub fn succeeds(&self, args: &[&str]) -> anyhow::Result<bool> {
        Ok(self.output(args)?.status.success())
    }

    fn output(&self, args: &[&str]) -> anyhow::Result<std::process::Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .with_context(|| format!("failed to spawn git {}", args.join(" ")))
    }

    pub fn current_branch(&self) -> anyhow::Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// The `@{upstream}` ref of the current branch, if it has one.
    pub fn tracking_ref(&self) -> anyhow::Result<Option<String>> {
        self.try_run(&[
            "rev-parse",
            "--abbrev-ref",
            "--symbolic-full-name",
            "@{upstream}",
        ])
    }

    pub fn remote_url(&self, remote: &str) -> anyhow::Result<Option<String>> {
        self.try_run(&["config", &format!("remote.{remote}.url")])
    }

    pub fn remotes(&self) -> anyhow::Result<Vec<String>> {
        let listing = self.run(&["remote"])?;
        Ok(listing.lines().map(str::to_string).collect())
    }

    pub fn add_remote(&self, name: &str, url: &str) -> anyhow::Result<()> {
        self.run(&["remote", "add", name, url])?;
        Ok(())
    }

    pub fn fetch_into(&self, remote: &str, mainline: &str, tracking: &str) -> anyhow::Result<()> {
        self.run(&["fetch", remote, &format!("{mainline}:{tracking}")])?;
        Ok(())
    }

    pub fn push(&self, remote: &str, refspec: &str) -> anyhow::Result<()> {
        self.run(&["push", remote, refspec])?;
        Ok(())
    }

    pub fn rev_parse(&self, rev: &str) -> anyhow::Result<CommitId> {
        let raw = self.run(&["rev-parse", rev])?;
        CommitId::try_parse(raw)
    }

    /// Resolve a revision that may not exist yet (e.g. an unfetched branch).
    pub fn try_rev_parse(&self, rev: &str) -> anyhow::Result<Option<CommitId>> {
        match self.try_run(&["rev-parse", "--verify", "--quiet", rev])? {
            Some(raw) => Ok(Some(CommitId::try_parse(raw)?)),
            None => Ok(None),
        }
    }

    pub fn merge_base(&self, a: &str, b: &str) -> anyhow::Result<Option<CommitId>> {
        match self.try_run(&["merge-base", a, b])? {
            Some(raw) if !raw.is_empty() => Ok(Some(CommitId::try_parse(raw)?)),
            _ => Ok(None),
        }
    }

    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> anyhow::Result<bool> {
        self.succeeds(&["merge-base", "--is-ancestor", ancestor, descendant])
    }

    /// Commits reachable from `until` but not from `since`, oldest first,
    /// limited to the given branch.
    pub fn commits_between(
        &self,
        since: &str,
        until: &str,
        branch: &str,
    ) -> anyhow::Result<Vec<CommitId>> {
        let listing = self.run(&["rev-list", "--reverse", &format!("{since}..{until}"), branch])?;
        Self::parse_commit_lines(&listing)
    }

    /// Commits on `branch` that are not reachable from `base`, oldest first.
    pub fn commits_since(&self, base: &str, branch: &str) -> anyhow::Result<Vec<CommitId>> {
        let listing = self.run(&["rev-list", "--reverse", &format!("{base}..{branch}")])?;
        Self::parse_commit_lines(&listing)
    }

    /// Every commit reachable from `branch`, oldest first.
    pub fn full_history(&self, branch: &str) -> anyhow::Result<Vec<CommitId>> {
        let listing = self.run(&["rev-list", "--reverse", branch])?;
        Self::parse_commit_lines(&listing)
    }

    fn parse_commit_lines(listing: &str) -> anyhow::Result<Vec<CommitId>> {
        listing
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| CommitId::try_parse(line.to_string()))
            .collect()
    }

    /// The mbox-formatted patch for exactly one commit.
    pub fn format_patch(&self, commit: &CommitId) -> anyhow::Result<String> {
        self.run(&["format-patch", "-1", "--stdout", commit.as_ref()])
    }

    pub fn apply_mailbox(&self, patch: &Path) -> anyhow::Result<()> {
        let patch = patch.to_str().context("patch path is not valid UTF-8")?;
        self.run(&["am", patch])?;
        Ok(())
    }

    /// Abort an in-progress `git am`; a failure here just means there was
    /// nothing to abort.
    pub fn abort_mailbox(&self) -> anyhow::Result<()> {
        self.try_run(&["am", "--abort"])?;
        Ok(())
    }

    pub fn reset_hard(&self, commit: &CommitId) -> anyhow::Result<()> {
        self.run(&["reset", "--hard", commit.as_ref()])?;
        Ok(())
    }

    pub fn checkout(&self, branch: &str) -> anyhow::Result<()> {
        self.run(&["checkout", branch])?;
        Ok(())
    }

    pub fn create_branch(&self, name: &str) -> anyhow::Result<()> {
        self.run(&["branch", name])?;
        Ok(())
    }

    pub fn force_branch(&self, name: &str, target: &str) -> anyhow::Result<()> {
        self.run(&["branch", "-f", name, target])?;
        Ok(())
    }

    pub fn git_dir(&self) -> anyhow::Result<Option<PathBuf>> {
        Ok(self
            .try_run(&["rev-parse", "--git-dir"])?
            .map(PathBuf::from))
    }

    /// True when the working tree carries staged, unstaged, or untracked
    /// changes.
    pub fn is_working_tree_dirty(&self) -> anyhow::Result<bool> {
        if !self.succeeds(&["diff", "--cached", "--quiet"])? {
            return Ok(true);
        }
        if !self.succeeds(&["diff", "--quiet"])? {
            return Ok(true);
        }

        let untracked = self.run(&["ls-files", "--others", "--exclude-standard"])?;
        Ok(!untracked.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_command_echo_goes_through_the_injected_writer() {
        let buffer = SharedBuffer::default();
        let writer: Rc<RefCell<Box<dyn Write>>> =
            Rc::new(RefCell::new(Box::new(buffer.clone())));
        let git = Git::new(Path::new("."), writer);

        git.run(&["version"]).unwrap();

        assert!(buffer.contents().contains("Running: git version"));
    }
}

