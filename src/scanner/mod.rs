use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::config::expand_home;

/// A directory offered as a working directory for a new session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDirectory {
    pub absolute_path: PathBuf,
    /// Display name, and the default session name
    pub basename: String,
    /// Search path (as configured) this was found under
    pub source_root: String,
}

impl CandidateDirectory {
    /// Build a candidate for an arbitrary directory outside any scan
    pub fn from_path(absolute_path: PathBuf, source_root: impl Into<String>) -> Self {
        let basename = absolute_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| absolute_path.to_string_lossy().to_string());
        Self {
            absolute_path,
            basename,
            source_root: source_root.into(),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Resolve a configured root to a canonical existing directory
fn resolve_root(pattern: &str) -> Option<PathBuf> {
    let expanded = expand_home(pattern);
    match expanded.canonicalize() {
        Ok(path) if path.is_dir() => Some(path),
        Ok(path) => {
            tracing::warn!("Search path {} is not a directory", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Skipping search path {}: {}", expanded.display(), e);
            None
        }
    }
}

/// Collect subdirectories of every root down to `max_depth`, without duplicates
pub fn scan<S: AsRef<str>>(roots: &[S], max_depth: usize) -> Vec<CandidateDirectory> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut candidates = Vec::new();

    if max_depth == 0 {
        return candidates;
    }

    for pattern in roots {
        let pattern = pattern.as_ref();
        let Some(root) = resolve_root(pattern) else {
            continue;
        };

        let before = candidates.len();
        for dir in walk_root(&root, max_depth) {
            if seen.insert(dir.clone()) {
                candidates.push(CandidateDirectory::from_path(dir, pattern));
            }
        }
        tracing::debug!(
            root = %root.display(),
            found = candidates.len() - before,
            "Scanned search path"
        );
    }

    candidates
}

fn walk_root(root: &Path, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        // Prune hidden subtrees entirely; the root is exempt
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(DirEntry::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths(candidates: &[CandidateDirectory]) -> Vec<PathBuf> {
        candidates.iter().map(|c| c.absolute_path.clone()).collect()
    }

    #[test]
    fn test_hidden_and_root_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("a/.hidden")).unwrap();

        let found = scan(&[root.to_string_lossy()], 2);
        assert_eq!(paths(&found), vec![root.join("a")]);
        assert_eq!(found[0].basename, "a");
    }

    #[test]
    fn test_depth_is_bounded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("a/b/c")).unwrap();

        let mut found = paths(&scan(&[root.to_string_lossy()], 2));
        found.sort();
        assert_eq!(found, vec![root.join("a"), root.join("a/b")]);

        let found = paths(&scan(&[root.to_string_lossy()], 1));
        assert_eq!(found, vec![root.join("a")]);

        assert!(scan(&[root.to_string_lossy()], 0).is_empty());
    }

    #[test]
    fn test_files_are_not_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        fs::create_dir(root.join("proj")).unwrap();
        fs::write(root.join("notes.txt"), "hi").unwrap();

        assert_eq!(paths(&scan(&[root.to_string_lossy()], 2)), vec![root.join("proj")]);
    }

    #[test]
    fn test_overlapping_roots_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("work/api")).unwrap();
        fs::create_dir_all(root.join("other")).unwrap();

        let outer = root.to_string_lossy().to_string();
        let inner = root.join("work").to_string_lossy().to_string();
        let trailing = format!("{}/", outer);
        let found = scan(&[outer.clone(), inner, trailing], 2);

        let mut all = paths(&found);
        all.sort();
        let mut unique = all.clone();
        unique.dedup();
        assert_eq!(all, unique);
        assert_eq!(all.len(), 3);

        let api = found
            .iter()
            .find(|c| c.absolute_path == root.join("work/api"))
            .unwrap();
        assert_eq!(api.source_root, outer);
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        fs::create_dir(root.join("proj")).unwrap();

        let missing = root.join("does-not-exist").to_string_lossy().to_string();
        let found = scan(&[missing, root.to_string_lossy().to_string()], 2);
        assert_eq!(paths(&found), vec![root.join("proj")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_does_not_abort_scan() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("locked/inner")).unwrap();
        fs::create_dir(root.join("open")).unwrap();
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read through 0o000, so there is nothing to exercise
        if fs::read_dir(root.join("locked")).is_ok() {
            fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let found = paths(&scan(&[root.to_string_lossy()], 2));
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

        assert!(found.contains(&root.join("open")));
        assert!(found.contains(&root.join("locked")));
        assert!(!found.contains(&root.join("locked/inner")));
    }
}
