//! Run-scoped patch snapshots.
//!
//! Before the branch is reset, every local-only commit is serialized to one
//! mbox patch file inside a temporary directory. File names carry the
//! sequence index and the short hash (`0003-1a2b3c4d.patch`) so the apply
//! order is visible on disk. The directory is removed when the set is
//! dropped, on success and failure alike.

use crate::areas::git::Git;
use crate::artifacts::commit_id::CommitId;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct PatchFile {
    pub path: PathBuf,
    pub commit: CommitId,
}

impl PatchFile {
    pub fn file_name(&self) -> &str {
        // set by snapshot(), always valid UTF-8
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("<patch>")
    }
}

pub struct PatchSet {
    dir: TempDir,
    files: Vec<PatchFile>,
}

impl PatchSet {
    /// Serialize `commits` (oldest first) into numbered patch files.
    pub fn snapshot(git: &Git, commits: &[CommitId]) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let mut files = Vec::with_capacity(commits.len());

        for (index, commit) in commits.iter().enumerate() {
            let path = dir.path().join(patch_file_name(index, commit));
            let patch = git.format_patch(commit)?;
            std::fs::write(&path, patch)?;
            files.push(PatchFile {
                path,
                commit: commit.clone(),
            });
        }

        Ok(PatchSet { dir, files })
    }

    pub fn files(&self) -> &[PatchFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn dir_path(&self) -> &Path {
        self.dir.path()
    }
}

fn patch_file_name(index: usize, commit: &CommitId) -> String {
    format!("{index:04}-{}.patch", commit.short())
}
