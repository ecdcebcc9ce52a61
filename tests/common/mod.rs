// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use git2::{Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory to act as the analysed root
pub fn create_root() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();
    (dir, root)
}

/// Initialise a real git repository at `root/rel`
pub fn init_repo(root: &Path, rel: &str) -> Repository {
    let path = root.join(rel);
    fs::create_dir_all(&path).unwrap();
    let repo = Repository::init(&path).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    repo
}

/// Write a file and commit it
pub fn add_commit(repo: &Repository, files: &[(&str, &[u8])], message: &str) -> git2::Oid {
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let mut index = repo.index().unwrap();

    for (path, content) in files {
        let full_path = repo.workdir().unwrap().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }

    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).unwrap()
}

/// Create `count` repositories named repo1..repoN, each with one commit
pub fn create_repos(root: &Path, count: usize) -> Vec<PathBuf> {
    (1..=count)
        .map(|i| {
            let rel = format!("repo{}", i);
            let repo = init_repo(root, &rel);
            add_commit(&repo, &[("README.md", format!("# repo {}", i).as_bytes())], "init");
            root.join(rel)
        })
        .collect()
}

/// Plain directory tree without any repository
pub fn mkdirs(root: &Path, paths: &[&str]) {
    for p in paths {
        fs::create_dir_all(root.join(p)).unwrap();
    }
}

/// True when a `git` executable can be started
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
