//! Vault settings
//!
//! Settings live in `.matterfold.yaml` at the vault root:
//!
//! ```yaml
//! templateFolder: templates
//! templates:
//!   "": templates/root.md
//!   projects: templates/project.md
//!   projects/web:
//!     templatePath: templates/web.md
//!     excludePatterns: ["README.md", "drafts/**"]
//! ```

use crate::core::chain::{normalize_path, ChainResolver, TemplateMapping};
use crate::core::glob::PatternCache;
use crate::error::{MatterFoldError, Result};
use crate::io::fs::read_to_string;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Settings file looked up at the vault root
pub const DEFAULT_SETTINGS_FILE: &str = ".matterfold.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Folder path → template mapping; `""` is inherited by every document,
    /// `"/"` applies only where no other folder matched
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateMapping>,

    /// Folder holding template files; its contents are never templated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_folder: Option<String>,
}

impl Settings {
    /// Parse settings from YAML; blank input gives the defaults
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(text)?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load `.matterfold.yaml` from a vault root, or defaults when absent
    pub fn load_from_vault(root: &Path) -> Result<Self> {
        let path = root.join(DEFAULT_SETTINGS_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject mappings that can never resolve, and exclude patterns that
    /// do not compile
    pub fn validate(&self) -> Result<()> {
        let mut patterns = PatternCache::new();
        for (folder, mapping) in &self.templates {
            if mapping.template_path().trim().is_empty() {
                return Err(MatterFoldError::invalid_config(format!(
                    "folder {:?} maps to an empty template path",
                    folder
                )));
            }
            if mapping.exclude_patterns().iter().any(|p| p.is_empty()) {
                return Err(MatterFoldError::invalid_config(format!(
                    "folder {:?} has an empty exclude pattern",
                    folder
                )));
            }
            for pattern in mapping.exclude_patterns() {
                patterns.compile(pattern)?;
            }
        }
        Ok(())
    }

    /// Chain resolver over the configured mappings
    pub fn resolver(&self) -> ChainResolver {
        ChainResolver::new(
            self.templates
                .iter()
                .map(|(folder, mapping)| (folder.as_str(), mapping.clone())),
        )
    }

    /// Check whether a vault-relative path is itself a template
    pub fn is_template_file(&self, relative_path: &str) -> bool {
        let path = normalize_path(relative_path);

        if let Some(folder) = self.template_folder.as_deref() {
            let folder = normalize_path(folder);
            if !folder.is_empty() && path.starts_with(&format!("{}/", folder)) {
                return true;
            }
        }

        let stem = path.strip_suffix(".md").unwrap_or(&path);
        self.templates.values().any(|mapping| {
            let template = normalize_path(mapping.template_path());
            template == path || template == stem
        })
    }
}
