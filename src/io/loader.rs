//! Template loading
//!
//! Loading is the one boundary between chain resolution and the fold. It runs
//! in two phases: every chain item is requested first, then only the items
//! that produced content move on. An item that fails to load is dropped and
//! logged; it never aborts the rest of the chain.

use crate::core::chain::TemplateChain;
use crate::error::{MatterFoldError, Result};
use crate::io::fs;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Turns a configured template path into template text
pub trait TemplateLoader {
    fn load(&self, template_path: &str) -> Result<String>;
}

impl<T: TemplateLoader + ?Sized> TemplateLoader for &T {
    fn load(&self, template_path: &str) -> Result<String> {
        (**self).load(template_path)
    }
}

/// In-memory templates keyed by path, mostly for tests and previews
impl TemplateLoader for HashMap<String, String> {
    fn load(&self, template_path: &str) -> Result<String> {
        self.get(template_path)
            .cloned()
            .ok_or_else(|| MatterFoldError::template_not_found(template_path))
    }
}

/// Loads templates from files under a vault root
#[derive(Debug, Clone)]
pub struct FsTemplateLoader {
    root: PathBuf,
}

impl FsTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for a template path; a path without an extension
    /// also tries `.md`
    fn candidates(&self, template_path: &str) -> Vec<PathBuf> {
        let relative = template_path.trim_start_matches('/');
        let path = self.root.join(relative);
        if path.extension().is_some() {
            vec![path]
        } else {
            let with_md = path.with_extension("md");
            vec![path, with_md]
        }
    }
}

impl TemplateLoader for FsTemplateLoader {
    fn load(&self, template_path: &str) -> Result<String> {
        for candidate in self.candidates(template_path) {
            if candidate.is_file() {
                debug!("Loading template {}", candidate.display());
                return fs::read_to_string(&candidate);
            }
        }
        Err(MatterFoldError::template_not_found(template_path))
    }
}

/// A chain item that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub template: String,
    pub reason: String,
}

/// A chain with only loaded items left, plus what was dropped
#[derive(Debug, Clone, Default)]
pub struct LoadedChain {
    pub chain: TemplateChain,
    pub failures: Vec<LoadFailure>,
}

impl LoadedChain {
    /// Nothing loaded although something was requested
    pub fn all_failed(&self) -> bool {
        self.chain.is_empty() && !self.failures.is_empty()
    }
}

/// Load every item of a resolved chain, keeping root-to-leaf order
pub fn load_chain<L: TemplateLoader + ?Sized>(chain: TemplateChain, loader: &L) -> LoadedChain {
    let mut failures = Vec::new();

    // Phase one: request every item
    let requested: Vec<_> = chain
        .templates
        .into_iter()
        .map(|item| {
            let result = loader.load(&item.path);
            (item, result)
        })
        .collect();

    // Phase two: keep only what came back
    let mut loaded = Vec::with_capacity(requested.len());
    for (item, result) in requested {
        match result {
            Ok(content) => loaded.push(item.with_content(content)),
            Err(e) => {
                warn!("Dropping template {} from chain: {}", item.path, e);
                failures.push(LoadFailure {
                    template: item.path,
                    reason: e.to_string(),
                });
            }
        }
    }

    LoadedChain {
        chain: TemplateChain::new(loaded),
        failures,
    }
}
