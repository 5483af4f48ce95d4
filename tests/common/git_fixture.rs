//! Real git repositories in temp directories

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Identity used for fixture commits and for gimer's merge commits
pub const GIT_IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Gimer Test"),
    ("GIT_AUTHOR_EMAIL", "test@example.com"),
    ("GIT_COMMITTER_NAME", "Gimer Test"),
    ("GIT_COMMITTER_EMAIL", "test@example.com"),
];

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .envs(GIT_IDENTITY)
        .output()
        .expect("git runs");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A bare "remote" with `main` and a `feature` branch one commit ahead
pub struct TempRemote {
    dir: TempDir,
}

impl TempRemote {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let bare = dir.path().join("origin.git");
        let seed = dir.path().join("seed");
        std::fs::create_dir_all(&bare).unwrap();
        std::fs::create_dir_all(&seed).unwrap();

        git(&bare, &["init", "--bare", "--initial-branch=main"]);
        git(&seed, &["init", "--initial-branch=main"]);
        std::fs::write(seed.join("README.md"), "hello\n").unwrap();
        git(&seed, &["add", "README.md"]);
        git(&seed, &["commit", "-m", "initial commit"]);
        git(&seed, &["remote", "add", "origin", bare.to_str().unwrap()]);
        git(&seed, &["push", "origin", "main"]);

        git(&seed, &["checkout", "-b", "feature"]);
        std::fs::write(seed.join("feature.txt"), "new feature\n").unwrap();
        git(&seed, &["add", "feature.txt"]);
        git(&seed, &["commit", "-m", "add feature"]);
        git(&seed, &["push", "origin", "feature"]);

        Self { dir }
    }

    /// Path of the bare repository, usable as a clone URL
    pub fn url(&self) -> String {
        self.bare().to_string_lossy().into_owned()
    }

    pub fn bare(&self) -> PathBuf {
        self.dir.path().join("origin.git")
    }

    /// Commit subjects on `branch` of the bare repository
    pub fn log(&self, branch: &str) -> Vec<String> {
        git(&self.bare(), &["log", branch, "--format=%s"])
            .lines()
            .map(String::from)
            .collect()
    }
}
