//! Applying template chains to documents
//!
//! One document at a time: resolve the chain for its location, load the
//! templates, fold them root to leaf, then merge the result into the
//! document with the document's own values taking precedence.

use crate::config::Settings;
use crate::core::block;
use crate::core::chain::{accumulate_chain, AccumulatedTemplate, ChainResolver, TemplateChain};
use crate::core::codec;
use crate::core::merge::{apply_to_file, merge_with_file};
use crate::error::{MatterFoldError, Result};
use crate::io::fs::{read_to_string, relative_path};
use crate::io::loader::{load_chain, TemplateLoader};
use crate::io::vault::markdown_files;
use crate::io::writer::{DocumentWriter, WriteResult};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Something worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Applied {
        path: String,
        conflicts: Vec<String>,
        added: Vec<String>,
    },
    NoTemplateConfigured {
        path: String,
    },
    NoTemplatesLoaded {
        path: String,
    },
    TemplateSkipped {
        template: String,
        reason: String,
    },
}

/// Receives notices as documents are processed
pub trait Notifier {
    fn notice(&self, notice: Notice);
}

/// Forwards notices to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, notice: Notice) {
        match notice {
            Notice::Applied {
                path,
                conflicts,
                added,
            } => info!(
                "Applied templates to {} ({} added, {} kept from file)",
                path,
                added.len(),
                conflicts.len()
            ),
            Notice::NoTemplateConfigured { path } => {
                info!("No template configured for {}", path)
            }
            Notice::NoTemplatesLoaded { path } => {
                warn!("No templates could be loaded for {}", path)
            }
            Notice::TemplateSkipped { template, reason } => {
                warn!("Skipped template {}: {}", template, reason)
            }
        }
    }
}

/// Result of applying templates to one document's text
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub text: String,
    /// Keys the document already had
    pub conflicts: Vec<String>,
    /// Keys the templates contributed
    pub added: Vec<String>,
    /// Templates that loaded and contributed
    pub templates: usize,
    pub changed: bool,
}

/// Per-file results of a folder run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<WriteResult>,
    pub unchanged: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub errors: Vec<(PathBuf, MatterFoldError)>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }

    /// Collapse collected errors into one, if any
    pub fn into_result(self) -> Result<Self> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            let errors = self.errors.into_iter().map(|(_, e)| e).collect();
            Err(MatterFoldError::multiple(errors))
        }
    }
}

/// Applies the configured template chains
pub struct Applier<'a> {
    settings: &'a Settings,
    loader: &'a dyn TemplateLoader,
    notifier: &'a dyn Notifier,
    resolver: ChainResolver,
    writer: DocumentWriter,
}

impl<'a> Applier<'a> {
    pub fn new(
        settings: &'a Settings,
        loader: &'a dyn TemplateLoader,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            settings,
            loader,
            notifier,
            resolver: settings.resolver(),
            writer: DocumentWriter::new(),
        }
    }

    /// Use a custom writer for file output
    pub fn with_writer(mut self, writer: DocumentWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Resolve the unloaded chain for a vault-relative document path
    pub fn resolve(&mut self, doc_path: &str) -> TemplateChain {
        self.resolver.get_template_chain(doc_path)
    }

    /// Resolve, load, and fold the chain for a document location.
    ///
    /// Fails with `NoTemplateConfigured` when nothing maps to the location and
    /// with `NoTemplatesLoaded` when mappings exist but every load failed.
    pub fn render(&mut self, doc_path: &str) -> Result<AccumulatedTemplate> {
        let chain = self.resolve(doc_path);
        if chain.is_empty() {
            self.notifier.notice(Notice::NoTemplateConfigured {
                path: doc_path.to_string(),
            });
            return Err(MatterFoldError::no_template_configured(doc_path));
        }

        let attempted = chain.len();
        let loaded = load_chain(chain, self.loader);
        for failure in &loaded.failures {
            self.notifier.notice(Notice::TemplateSkipped {
                template: failure.template.clone(),
                reason: failure.reason.clone(),
            });
        }

        if loaded.chain.is_empty() {
            self.notifier.notice(Notice::NoTemplatesLoaded {
                path: doc_path.to_string(),
            });
            return Err(MatterFoldError::no_templates_loaded(doc_path, attempted));
        }

        debug!(
            "Folding {} template(s) for {}",
            loaded.chain.len(),
            doc_path
        );
        Ok(accumulate_chain(&loaded.chain))
    }

    /// Apply the chain for `doc_path` to the document's current text
    pub fn apply_to_text(&mut self, doc_path: &str, file_text: &str) -> Result<ApplyOutcome> {
        let accumulated = self.render(doc_path)?;

        let mut result = merge_with_file(file_text, &accumulated.frontmatter_text());
        result.merged.strip_delete_key();

        let merged_text = if result.merged.is_empty() {
            String::new()
        } else {
            codec::serialize(&result.merged)
        };
        let mut text = apply_to_file(file_text, &merged_text);

        let parts = block::split(&text);
        if parts.body.trim().is_empty() && !accumulated.body.is_empty() {
            let head = &text[..text.len() - parts.body.len()];
            let separator = if head.is_empty() || head.ends_with('\n') {
                ""
            } else {
                "\n"
            };
            text = format!("{}{}{}\n", head, separator, accumulated.body);
        }

        let changed = text != file_text;
        self.notifier.notice(Notice::Applied {
            path: doc_path.to_string(),
            conflicts: result.conflicts.clone(),
            added: result.added.clone(),
        });

        Ok(ApplyOutcome {
            text,
            conflicts: result.conflicts,
            added: result.added,
            templates: accumulated.template_count,
            changed,
        })
    }

    /// Apply to a file on disk; nothing is written on a dry run
    pub fn apply_to_path(
        &mut self,
        vault_root: &Path,
        path: &Path,
        dry_run: bool,
    ) -> Result<WriteResult> {
        let relative = relative_path(vault_root, path)?;
        let original = read_to_string(path)?;
        let outcome = self.apply_to_text(&relative, &original)?;
        self.writer.write(path, &original, &outcome.text, dry_run)
    }

    /// Apply to every markdown file under `folder`, collecting per-file errors.
    ///
    /// Template files and documents with no configured template are skipped.
    pub fn apply_folder(
        &mut self,
        vault_root: &Path,
        folder: &Path,
        dry_run: bool,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for entry in markdown_files(vault_root, folder)? {
            let path = entry.path().to_path_buf();
            if self.settings.is_template_file(entry.relative()) {
                debug!("Skipping template file {}", entry.relative());
                report.skipped.push(path);
                continue;
            }

            match self.apply_to_path(vault_root, &path, dry_run) {
                Ok(result) if result.modified => report.written.push(result),
                Ok(_) => report.unchanged.push(path),
                Err(MatterFoldError::NoTemplateConfigured { .. }) => report.skipped.push(path),
                Err(e) => report.errors.push((path, e)),
            }
        }

        Ok(report)
    }
}
