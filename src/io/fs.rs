use crate::error::{MatterFoldError, Result};
use std::fs;
use std::path::Path;

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "md" || s == "markdown")
        .unwrap_or(false)
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MatterFoldError::file_not_found(path),
        _ => MatterFoldError::Io(e),
    })
}

/// Vault-relative form of a path, with forward slashes
pub fn relative_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        MatterFoldError::path_resolution(format!(
            "{} is not inside {}",
            path.display(),
            root.display()
        ))
    })?;
    Ok(relative.to_string_lossy().replace('\\', "/"))
}
