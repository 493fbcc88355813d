//! matterfold: frontmatter templates inherited through a folder hierarchy
//!
//! A vault maps folders to template files. Every document inherits the
//! templates of all folders between the vault root and its own folder; the
//! chain is folded root to leaf and the result is merged into the document,
//! whose own values always win.
//!
//! # Features
//!
//! - **Bespoke frontmatter codec** for the YAML subset notes actually use:
//!   scalars, inline and block lists, literal blocks, and empty markers
//! - **Deterministic merging** with list concatenation and de-duplication
//! - **Delete lists** that let a descendant template retract ancestor keys
//! - **Per-folder exclusion** with glob patterns
//! - **Atomic writes** with optional backups and dry-run diffs
//!
//! # Quick Start
//!
//! ## Merging frontmatter
//!
//! ```rust
//! use matterfold::merge_frontmatter;
//!
//! let result = merge_frontmatter("tags: [project]", "tags: [template]\nauthor: Jane");
//! assert_eq!(result.conflicts, vec!["tags"]);
//! assert_eq!(result.added, vec!["author"]);
//! assert_eq!(
//!     result.merged_text(),
//!     "tags:\n  - project\n  - template\nauthor: Jane\n"
//! );
//! ```
//!
//! ## Folding a chain
//!
//! ```rust
//! use matterfold::{accumulate_chain, TemplateChain, TemplateChainItem};
//!
//! let chain = TemplateChain::new(vec![
//!     TemplateChainItem::new("root.md", "", 0).with_content("---\nauthor: Jane\nstatus: new\n---\n"),
//!     TemplateChainItem::new("leaf.md", "notes", 1).with_content("---\ndelete: [status]\n---\n"),
//! ]);
//!
//! let accumulated = accumulate_chain(&chain);
//! assert_eq!(accumulated.frontmatter_text(), "author: Jane\n");
//! ```
//!
//! ## Applying to a vault
//!
//! ```rust,no_run
//! use matterfold::{Applier, FsTemplateLoader, LogNotifier, Result, Settings};
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let vault = Path::new("my-vault");
//!     let settings = Settings::load_from_vault(vault)?;
//!     let loader = FsTemplateLoader::new(vault);
//!     let mut applier = Applier::new(&settings, &loader, &LogNotifier);
//!
//!     let report = applier.apply_folder(vault, &vault.join("projects"), false)?;
//!     println!("{} files processed", report.processed());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: pure logic with no I/O (codec, merge, delete lists, chains)
//! - [`io`]: template loading, vault traversal, and file writing
//! - [`config`]: vault settings
//! - [`apply`]: per-document orchestration and notices
//! - [`error`]: error types

// Public API exports
pub use error::{ErrorSeverity, MatterFoldError, Result};

// Core types
pub use core::{
    accumulate_chain, apply_delete_list, apply_to_file, extract_delete_list, merge_documents,
    merge_frontmatter, merge_with_file, process_with_delete_list, AccumulatedTemplate,
    ChainResolver, DeleteListFold, FrontmatterDocument, MergeResult, PatternCache,
    ProcessedFrontmatter, TemplateChain, TemplateChainItem, TemplateMapping, Value, DELETE_KEY,
};
pub use core::codec::{parse, serialize};

// IO types
pub use io::{
    load_chain, DocumentWriter, FsTemplateLoader, LoadedChain, TemplateLoader, VaultEntry, Visit,
    WriteResult, WriterConfig,
};

pub use apply::{Applier, ApplyOutcome, BatchReport, LogNotifier, Notice, Notifier};
pub use config::{Settings, DEFAULT_SETTINGS_FILE};

pub mod apply;
pub mod config;
pub mod core;
pub mod error;
pub mod io;

// CLI components are available only in the binary, not as part of the library API
