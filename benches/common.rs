// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Generate a tree of `groups` x `per_group` directories where every
/// `repo_every`-th leaf is a repository with a small metadata directory
pub fn generate_workspace(groups: usize, per_group: usize, repo_every: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for g in 0..groups {
        for i in 0..per_group {
            let leaf = dir.path().join(format!("group_{}/project_{}/src", g, i));
            fs::create_dir_all(&leaf).unwrap();
            fs::write(leaf.join("main.rs"), vec![b'x'; 256]).unwrap();

            if (g * per_group + i) % repo_every == 0 {
                let git = leaf.parent().unwrap().join(".git/objects/pack");
                fs::create_dir_all(&git).unwrap();
                fs::write(git.join("pack-0.pack"), vec![0u8; 4096]).unwrap();
            }
        }
    }
    dir
}

/// Number of regular files under `root`
pub fn file_count(root: &Path) -> usize {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}
