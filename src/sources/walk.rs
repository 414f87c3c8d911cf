//! Project tree search.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// The directory tree a scan runs over.
///
/// Hidden directories (name starting with `.`) are never descended into, nor
/// is anything under the skip prefix. A hidden directory can still be found
/// by name from its parent.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    root: PathBuf,
    skip_prefix: Option<String>,
}

impl ProjectTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip_prefix: None,
        }
    }

    /// Skip every directory whose root-relative path starts with `prefix`.
    #[must_use]
    pub fn with_skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.skip_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the root, with `/` separators, for logs and prefixes.
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Every file named `name` in a searched directory, in path order.
    #[must_use]
    pub fn find_files(&self, name: &str) -> Vec<PathBuf> {
        self.searched_dirs()
            .into_iter()
            .map(|dir| dir.join(name))
            .filter(|path| path.is_file())
            .collect()
    }

    /// Every directory named `name` in a searched directory, in path order.
    #[must_use]
    pub fn find_dirs(&self, name: &str) -> Vec<PathBuf> {
        self.searched_dirs()
            .into_iter()
            .map(|dir| dir.join(name))
            .filter(|path| path.is_dir())
            .collect()
    }

    fn searched_dirs(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_pruned(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .map(DirEntry::into_path)
            .collect()
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            return true;
        }
        self.skip_prefix.as_deref().is_some_and(|prefix| {
            let rel = format!("{}/", self.relative(entry.path()));
            rel.starts_with(prefix)
        })
    }
}
