use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Find the git root directory by searching upward from `start`.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut path = start;

    loop {
        if path.join(".git").exists() {
            return Some(path.to_path_buf());
        }
        path = path.parent()?;
    }
}

/// Resolve the repository directory the bisect session runs in.
pub fn resolve_repo_root(repo: Option<String>) -> Result<PathBuf> {
    if let Some(path) = repo {
        return PathBuf::from(&path)
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize provided repository path: {}", path));
    }

    let current = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_git_root(&current).unwrap_or(current))
}
