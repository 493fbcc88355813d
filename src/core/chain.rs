//! Template chain resolution
//!
//! A document inherits templates from every folder between the vault root and
//! its parent folder. The chain is ordered root to leaf, and that order is
//! also the fold order: each step's output feeds the next.

use crate::core::block;
use crate::core::codec;
use crate::core::delete_list::DeleteListFold;
use crate::core::document::FrontmatterDocument;
use crate::core::glob::PatternCache;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a folder maps to: a bare template path or a path with exclusions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateMapping {
    /// `folder: templates/x.md`
    Path(String),
    /// `folder: { templatePath: ..., excludePatterns: [...] }`
    Config {
        #[serde(rename = "templatePath")]
        template_path: String,
        #[serde(default, rename = "excludePatterns")]
        exclude_patterns: Vec<String>,
    },
}

impl TemplateMapping {
    /// The mapped template path
    pub fn template_path(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Config { template_path, .. } => template_path,
        }
    }

    /// Glob patterns that exclude documents from this mapping
    pub fn exclude_patterns(&self) -> &[String] {
        match self {
            Self::Path(_) => &[],
            Self::Config {
                exclude_patterns, ..
            } => exclude_patterns,
        }
    }
}

/// One applicable template; `content` is filled in by a loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateChainItem {
    /// Template path as configured
    pub path: String,
    /// Folder whose mapping produced this item (`""` for the root)
    pub folder_path: String,
    /// Distance from the vault root (root is 0)
    pub depth: usize,
    /// Template text, once loaded
    pub content: Option<String>,
}

impl TemplateChainItem {
    /// Create an unloaded chain item
    pub fn new(path: impl Into<String>, folder_path: impl Into<String>, depth: usize) -> Self {
        Self {
            path: path.into(),
            folder_path: folder_path.into(),
            depth,
            content: None,
        }
    }

    /// Attach loaded content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Templates applicable to one document, root first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateChain {
    pub templates: Vec<TemplateChainItem>,
    /// More than one template is present; informational only
    pub has_inheritance: bool,
}

impl TemplateChain {
    /// Build a chain from items already in root-to-leaf order
    pub fn new(templates: Vec<TemplateChainItem>) -> Self {
        let has_inheritance = templates.len() > 1;
        Self {
            templates,
            has_inheritance,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Keep only the items whose content loaded
    pub fn into_loaded(self) -> Self {
        Self::new(
            self.templates
                .into_iter()
                .filter(|item| item.content.is_some())
                .collect(),
        )
    }
}

/// Normalize a vault-relative path: forward slashes, no surrounding `/`.
///
/// The root folder, whether written `""` or `"/"`, becomes `""`.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_matches('/').to_string()
}

/// Folders from the root down to the document's parent, root as `""`
pub fn folder_ancestry(document_path: &str) -> Vec<String> {
    let normalized = normalize_path(document_path);
    let mut segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();

    let mut folders = vec![String::new()];
    let mut current = String::new();
    for segment in segments {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        folders.push(current.clone());
    }
    folders
}

/// Path of a document relative to one of its ancestor folders
fn relative_to<'a>(document_path: &'a str, folder: &str) -> &'a str {
    if folder.is_empty() {
        return document_path;
    }
    document_path
        .strip_prefix(folder)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(document_path)
}

/// Resolves template chains from a folder→template mapping table
#[derive(Debug, Default)]
pub struct ChainResolver {
    mappings: HashMap<String, TemplateMapping>,
    /// Mapping keyed `"/"`, used only when nothing else in the walk matched
    fallback_root: Option<TemplateMapping>,
    patterns: PatternCache,
}

impl ChainResolver {
    /// Create a resolver; folder keys are normalized, and a `"/"` key
    /// becomes the root fallback rather than a regular root mapping
    pub fn new<I, K>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, TemplateMapping)>,
        K: AsRef<str>,
    {
        let mut normalized = HashMap::new();
        let mut fallback_root = None;
        for (folder, mapping) in mappings {
            let key = normalize_path(folder.as_ref());
            if key.is_empty() && !folder.as_ref().is_empty() {
                fallback_root = Some(mapping);
            } else {
                normalized.insert(key, mapping);
            }
        }
        Self {
            mappings: normalized,
            fallback_root,
            patterns: PatternCache::new(),
        }
    }

    /// The mapping configured for a folder, if any
    ///
    /// The root (`""` or `"/"`) prefers an explicit `""` mapping over the
    /// fallback.
    pub fn mapping_for(&self, folder: &str) -> Option<&TemplateMapping> {
        let key = normalize_path(folder);
        match self.mappings.get(&key) {
            Some(mapping) => Some(mapping),
            None if key.is_empty() => self.fallback_root.as_ref(),
            None => None,
        }
    }

    /// Check if no folder is mapped at all
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty() && self.fallback_root.is_none()
    }

    /// Collect the templates applicable to a document, root first.
    ///
    /// Exclusion is checked per folder, so a document excluded at one level
    /// still inherits from the others. The `"/"` fallback applies only when
    /// the walk found nothing and no `""` mapping exists. An empty chain
    /// means nothing is configured for this document; that is not an error.
    pub fn get_template_chain(&mut self, document_path: &str) -> TemplateChain {
        let document = normalize_path(document_path);
        let mut templates = Vec::new();

        for (depth, folder) in folder_ancestry(&document).into_iter().enumerate() {
            let Some(mapping) = self.mappings.get(&folder) else {
                continue;
            };

            let relative = relative_to(&document, &folder);
            if self.patterns.excludes(mapping.exclude_patterns(), relative) {
                debug!(
                    "{} excluded from template {} of folder {:?}",
                    document,
                    mapping.template_path(),
                    folder
                );
                continue;
            }

            templates.push(TemplateChainItem::new(
                mapping.template_path(),
                folder,
                depth,
            ));
        }

        if templates.is_empty() && !self.mappings.contains_key("") {
            if let Some(fallback) = &self.fallback_root {
                if self.patterns.excludes(fallback.exclude_patterns(), &document) {
                    debug!("{} excluded from root fallback", document);
                } else {
                    debug!("Using root fallback {} for {}", fallback.template_path(), document);
                    templates.push(TemplateChainItem::new(fallback.template_path(), "", 0));
                }
            }
        }

        TemplateChain::new(templates)
    }
}

/// Result of folding a loaded chain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccumulatedTemplate {
    /// Clean frontmatter, `delete` already consumed
    pub frontmatter: FrontmatterDocument,
    /// Non-empty bodies, trimmed and joined by a blank line
    pub body: String,
    /// The cumulative delete list after the last template
    pub delete_list: Vec<String>,
    /// Templates that contributed
    pub template_count: usize,
}

impl AccumulatedTemplate {
    /// Canonical serialization of the accumulated frontmatter
    pub fn frontmatter_text(&self) -> String {
        codec::serialize(&self.frontmatter)
    }

    /// `---\n<frontmatter>\n---\n<body>`, or just the body without frontmatter
    pub fn to_text(&self) -> String {
        let frontmatter = self.frontmatter_text();
        let frontmatter = frontmatter.trim_end();
        if frontmatter.is_empty() {
            self.body.clone()
        } else {
            format!("---\n{}\n---\n{}", frontmatter, self.body)
        }
    }
}

/// Fold a chain's loaded items root to leaf.
///
/// Frontmatter goes through the delete-list fold; bodies are concatenated
/// independently. Items without content are skipped.
pub fn accumulate_chain(chain: &TemplateChain) -> AccumulatedTemplate {
    let mut fold = DeleteListFold::new();
    let mut bodies = Vec::new();
    let mut template_count = 0;

    for item in &chain.templates {
        let Some(content) = item.content.as_deref() else {
            continue;
        };
        template_count += 1;

        let parts = block::split(content);
        if let Some(frontmatter) = parts.frontmatter {
            fold = fold.step(frontmatter);
        }

        let body = parts.body.trim();
        if !body.is_empty() {
            bodies.push(body);
        }
    }

    let (frontmatter, delete_list) = fold.finish();
    AccumulatedTemplate {
        frontmatter,
        body: bodies.join("\n\n"),
        delete_list,
        template_count,
    }
}
