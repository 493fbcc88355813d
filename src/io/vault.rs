//! Depth-first traversal of a vault folder tree
//!
//! Entries are visited in file-name order, folders before their contents.
//! Hidden entries (leading `.`) are never visited.

use crate::error::{MatterFoldError, Result};
use crate::io::fs::relative_path;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A node in the vault, with its vault-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEntry {
    File { path: PathBuf, relative: String },
    Folder { path: PathBuf, relative: String },
}

impl VaultEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::File { path, .. } | Self::Folder { path, .. } => path,
        }
    }

    pub fn relative(&self) -> &str {
        match self {
            Self::File { relative, .. } | Self::Folder { relative, .. } => relative,
        }
    }
}

/// What the walker does after a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// Do not descend into this folder; ignored for files
    SkipFolder,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Walk `start` (inside `root`) depth first, calling `visitor` for each entry.
///
/// `start` itself is visited first when it is a folder.
pub fn walk<F>(root: &Path, start: &Path, mut visitor: F) -> Result<()>
where
    F: FnMut(&VaultEntry) -> Result<Visit>,
{
    if !start.exists() {
        return Err(MatterFoldError::file_not_found(start));
    }

    let mut walker = WalkDir::new(start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| {
            MatterFoldError::path_resolution(format!("Error traversing directory: {}", e))
        })?;

        let path = entry.path().to_path_buf();
        let relative = relative_path(root, &path)?;
        let is_dir = entry.file_type().is_dir();
        let vault_entry = if is_dir {
            VaultEntry::Folder { path, relative }
        } else {
            VaultEntry::File { path, relative }
        };

        if visitor(&vault_entry)? == Visit::SkipFolder && is_dir {
            walker.skip_current_dir();
        }
    }

    Ok(())
}

/// Markdown files under `start`, as vault entries
pub fn markdown_files(root: &Path, start: &Path) -> Result<Vec<VaultEntry>> {
    let mut files = Vec::new();
    walk(root, start, |entry| {
        if let VaultEntry::File { path, .. } = entry {
            if crate::io::fs::is_markdown(path) {
                files.push(entry.clone());
            }
        }
        Ok(Visit::Continue)
    })?;
    Ok(files)
}
