use assert_cmd::Command;
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use rstest::fixture;
use std::path::{Path, PathBuf};

/// A sandbox with the three repositories one sync run touches: the upstream
/// project, the fork's bare origin, and the working clone the tool operates
/// on.
pub struct SyncWorld {
    root: TempDir,
    pub upstream: PathBuf,
    pub origin: PathBuf,
    pub work: PathBuf,
    /// Upstream mainline commits, oldest first.
    pub upstream_commits: Vec<String>,
    /// Local-only commits on the fork's main, oldest first.
    pub local_commits: Vec<String>,
}

pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn init_repo(dir: &Path) {
    std::fs::create_dir_all(dir).expect("failed to create repo dir");
    git(dir, &["init", "-b", "main"]);
    configure_identity(dir);
}

fn configure_identity(dir: &Path) {
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "user.email", "test@example.com"]);
}

pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) -> String {
    std::fs::write(dir.join(file), content).expect("failed to write file");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", message]);
    git(dir, &["rev-parse", "HEAD"])
}

fn random_sentence() -> String {
    let mut words = Words(3..6).fake::<Vec<String>>().join(" ");
    words.push('\n');
    words
}

impl SyncWorld {
    /// Upstream mainline with `upstream_len` commits; the fork's `main` is
    /// based at `base_index` and carries `local` commits of its own.
    pub fn new(upstream_len: usize, base_index: usize, local: usize) -> Self {
        assert!(base_index < upstream_len);

        let root = TempDir::new().expect("failed to create temp dir");
        let upstream = root.path().join("upstream");
        let origin = root.path().join("origin.git");
        let work = root.path().join("work");

        init_repo(&upstream);
        let mut upstream_commits = Vec::new();
        for i in 0..upstream_len {
            upstream_commits.push(commit_file(
                &upstream,
                &format!("upstream-{i}.txt"),
                &random_sentence(),
                &format!("upstream commit {i}"),
            ));
        }

        git(root.path(), &["init", "--bare", "-b", "main", "origin.git"]);

        git(
            root.path(),
            &["clone", upstream.to_str().unwrap(), "work"],
        );
        configure_identity(&work);
        git(&work, &["checkout", "-B", "main", &upstream_commits[base_index]]);

        let mut local_commits = Vec::new();
        for i in 0..local {
            local_commits.push(commit_file(
                &work,
                &format!("local-{i}.txt"),
                &random_sentence(),
                &format!("local commit {i}"),
            ));
        }

        git(&work, &["remote", "remove", "origin"]);
        git(&work, &["remote", "add", "origin", origin.to_str().unwrap()]);
        git(&work, &["push", "-u", "origin", "main"]);

        SyncWorld {
            root,
            upstream,
            origin,
            work,
            upstream_commits,
            local_commits,
        }
    }

    /// The fork's local commit edits the same file as the newer upstream
    /// commit, so reapplying it onto that commit conflicts.
    pub fn conflicting() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        let upstream = root.path().join("upstream");
        let origin = root.path().join("origin.git");
        let work = root.path().join("work");

        init_repo(&upstream);
        let base = commit_file(&upstream, "shared.txt", "base\n", "upstream commit 0");
        let tip = commit_file(&upstream, "shared.txt", "upstream\n", "upstream commit 1");

        git(root.path(), &["init", "--bare", "-b", "main", "origin.git"]);
        git(
            root.path(),
            &["clone", upstream.to_str().unwrap(), "work"],
        );
        configure_identity(&work);
        git(&work, &["checkout", "-B", "main", &base]);
        let local = commit_file(&work, "shared.txt", "local\n", "local commit 0");

        git(&work, &["remote", "remove", "origin"]);
        git(&work, &["remote", "add", "origin", origin.to_str().unwrap()]);
        git(&work, &["push", "-u", "origin", "main"]);

        SyncWorld {
            root,
            upstream,
            origin,
            work,
            upstream_commits: vec![base, tip],
            local_commits: vec![local],
        }
    }

    /// The fork's `main` and the upstream mainline share no history at all.
    pub fn unrelated() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        let upstream = root.path().join("upstream");
        let origin = root.path().join("origin.git");
        let work = root.path().join("work");

        init_repo(&upstream);
        let mut upstream_commits = Vec::new();
        for i in 0..3 {
            upstream_commits.push(commit_file(
                &upstream,
                &format!("upstream-{i}.txt"),
                &random_sentence(),
                &format!("upstream commit {i}"),
            ));
        }

        git(root.path(), &["init", "--bare", "-b", "main", "origin.git"]);

        init_repo(&work);
        let local = commit_file(&work, "local-0.txt", &random_sentence(), "local commit 0");
        git(&work, &["remote", "add", "origin", origin.to_str().unwrap()]);
        git(&work, &["push", "-u", "origin", "main"]);

        SyncWorld {
            root,
            upstream,
            origin,
            work,
            upstream_commits,
            local_commits: vec![local],
        }
    }

    /// The binary, preconfigured for this sandbox's repositories.
    pub fn sync_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sync-base").expect("failed to find sync-base binary");
        cmd.arg("--repo")
            .arg(&self.work)
            .arg("--upstream-url")
            .arg(&self.upstream);
        cmd
    }

    pub fn main_head(&self) -> String {
        git(&self.work, &["rev-parse", "main"])
    }

    pub fn fork_point(&self) -> String {
        git(&self.work, &["merge-base", "main", "llvm-main"])
    }

    /// Commit subjects on main, newest first.
    pub fn main_subjects(&self) -> Vec<String> {
        git(&self.work, &["log", "--format=%s", "main"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn backup_branches(&self) -> Vec<String> {
        git(
            &self.work,
            &["branch", "--list", "main-backup-*", "--format=%(refname:short)"],
        )
        .lines()
        .map(str::to_string)
        .collect()
    }

    pub fn upstream_tip(&self) -> &str {
        self.upstream_commits.last().expect("no upstream commits")
    }
}

#[fixture]
pub fn forked_world() -> SyncWorld {
    // 5 upstream commits, fork based at the second, 2 local commits
    SyncWorld::new(5, 1, 2)
}
