//! File writing with atomic operations, backup support, and diff generation

use crate::error::{MatterFoldError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Configuration for the document writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Create backup files before writing
    pub backup_enabled: bool,
    /// Backup file suffix (e.g., ".bak")
    pub backup_suffix: Option<String>,
    /// Use atomic writes (write to temp file first, then rename)
    pub atomic_writes: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            backup_enabled: false,
            backup_suffix: None,
            atomic_writes: true,
        }
    }
}

/// Result of a write operation
#[derive(Debug)]
pub struct WriteResult {
    /// Whether the file was (or, in a dry run, would be) modified
    pub modified: bool,
    /// Path where the content was written (None for a dry run)
    pub output_path: Option<PathBuf>,
    /// Path of backup file if created
    pub backup_path: Option<PathBuf>,
    /// Line diff between old and new content
    pub diff: Option<String>,
}

/// Writes merged documents back to disk
#[derive(Debug, Default)]
pub struct DocumentWriter {
    config: WriterConfig,
}

impl DocumentWriter {
    /// Create a new writer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new writer with custom configuration
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Write new content for a file whose previous content is `original`
    pub fn write(
        &self,
        path: &Path,
        original: &str,
        new_content: &str,
        dry_run: bool,
    ) -> Result<WriteResult> {
        let modified = original != new_content;
        let diff = generate_diff(original, new_content, path);

        if dry_run || !modified {
            return Ok(WriteResult {
                modified,
                output_path: None,
                backup_path: None,
                diff,
            });
        }

        let backup_path = if self.config.backup_enabled && path.exists() {
            Some(self.create_backup(path)?)
        } else {
            None
        };

        if self.config.atomic_writes {
            write_atomic(path, new_content)?;
        } else {
            fs::write(path, new_content)?;
        }

        Ok(WriteResult {
            modified,
            output_path: Some(path.to_path_buf()),
            backup_path,
            diff,
        })
    }

    fn create_backup(&self, original_path: &Path) -> Result<PathBuf> {
        let suffix = self.config.backup_suffix.as_deref().unwrap_or(".bak");
        let file_name = original_path
            .file_name()
            .ok_or_else(|| MatterFoldError::path_resolution("Could not extract filename"))?;
        let backup_path =
            original_path.with_file_name(format!("{}{}", file_name.to_string_lossy(), suffix));
        fs::copy(original_path, &backup_path)?;
        Ok(backup_path)
    }

    /// Get writer configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }
}

/// Write file atomically using a temporary file in the same directory
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        MatterFoldError::Io(std::io::Error::other(format!(
            "Failed to persist temporary file: {}",
            e
        )))
    })?;

    Ok(())
}

/// Minimal unified-style diff: common prefix and suffix trimmed, one hunk
pub fn generate_diff(old_content: &str, new_content: &str, path: &Path) -> Option<String> {
    if old_content == new_content {
        return None;
    }

    let old_lines: Vec<&str> = old_content.lines().collect();
    let new_lines: Vec<&str> = new_content.lines().collect();

    let common_prefix = old_lines
        .iter()
        .zip(new_lines.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let old_rest = &old_lines[common_prefix..];
    let new_rest = &new_lines[common_prefix..];

    let common_suffix = old_rest
        .iter()
        .rev()
        .zip(new_rest.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_middle = &old_rest[..old_rest.len() - common_suffix];
    let new_middle = &new_rest[..new_rest.len() - common_suffix];

    if old_middle.is_empty() && new_middle.is_empty() {
        // Only trailing newline differences
        return None;
    }

    let mut diff_lines = vec![
        format!("--- {}", path.display()),
        format!("+++ {}", path.display()),
        format!(
            "@@ -{},{} +{},{} @@",
            common_prefix + 1,
            old_middle.len(),
            common_prefix + 1,
            new_middle.len()
        ),
    ];
    diff_lines.extend(old_middle.iter().map(|line| format!("-{}", line)));
    diff_lines.extend(new_middle.iter().map(|line| format!("+{}", line)));

    Some(diff_lines.join("\n"))
}
