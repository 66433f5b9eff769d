use crate::areas::git::Git;
use crate::error::{Result, SyncError};
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;

/// Everything one sync run needs to know about the world: the two local
/// refs, the two remotes, and where the tracked reference commit comes from.
///
/// The CLI defaults mirror the setup this tool grew out of: a fork of
/// llvm-project whose `main` is periodically re-based onto the LLVM commit
/// that CIRCT pins as its `llvm` submodule.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Local branch carrying the downstream commits.
    pub branch: String,
    /// Local branch mirroring the upstream project's mainline.
    pub tracking_branch: String,
    /// Remote the upstream mainline is fetched from.
    pub upstream_remote: String,
    pub upstream_url: String,
    /// Branch name of the mainline on the upstream remote.
    pub upstream_mainline: String,
    /// Remote the fork itself lives on; `branch` must track it.
    pub origin_remote: String,
    /// Substring the origin URL must contain, when configured.
    pub origin_marker: Option<String>,
    /// Contents-listing API endpoint queried for the reference commit.
    pub api_url: String,
    /// Entry name whose `sha` is the reference commit.
    pub api_entry: String,
}

impl SyncConfig {
    /// The ref `branch` is expected to track, e.g. `origin/main`.
    pub fn expected_tracking_ref(&self) -> String {
        format!("{}/{}", self.origin_remote, self.branch)
    }
}

/// Handle to the repository a run operates on.
///
/// Carries the command runner, the configuration, and an injected writer for
/// all human-facing output, and is threaded explicitly through every
/// operation instead of relying on the process working directory. The
/// command runner shares the writer, so its command echoes land in the same
/// sink as everything else.
pub struct Repository {
    writer: Rc<RefCell<Box<dyn std::io::Write>>>,
    git: Git,
    config: SyncConfig,
}

impl Repository {
    pub fn new(
        path: &Path,
        config: SyncConfig,
        writer: Box<dyn std::io::Write>,
    ) -> Result<Self> {
        let path = path
            .canonicalize()
            .map_err(|err| SyncError::Precondition {
                message: format!("cannot open repository at {}: {err}", path.display()),
            })?;
        let writer = Rc::new(RefCell::new(writer));
        let git = Git::new(&path, Rc::clone(&writer));

        if git.git_dir()?.is_none() {
            return Err(SyncError::Precondition {
                message: format!("{} is not a git repository", path.display()),
            });
        }

        Ok(Repository {
            writer,
            git,
            config,
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn git(&self) -> &Git {
        &self.git
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}
