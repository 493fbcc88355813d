//! Command-line argument definitions
//!
//! Every vault-aware command takes `--vault` (defaults to the current
//! directory) and `--config` (defaults to `.matterfold.yaml` in the vault).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "matterfold",
    version,
    about = "Apply folder-inherited frontmatter templates to markdown notes",
    long_about = "matterfold resolves the chain of templates a note inherits from its \
                  folders, folds them root to leaf with list concatenation and delete \
                  lists, and merges the result into the note without overriding the \
                  note's own values."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Apply inherited templates to notes or whole folders
    Apply(ApplyArgs),
    /// Show the template chain a note inherits
    Chain(ChainArgs),
    /// Merge two frontmatter files and print the result
    Merge(MergeArgs),
    /// Print the folded template text for a note location
    Render(RenderArgs),
}

/// Vault location options
#[derive(Args, Debug, Clone)]
pub struct VaultOptions {
    /// Vault root directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub vault: PathBuf,

    /// Settings file (defaults to .matterfold.yaml in the vault)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Notes or folders to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub vault: VaultOptions,

    /// Preview changes without modifying files (show diff)
    #[arg(long)]
    pub dry_run: bool,

    /// Create backup files with this suffix
    #[arg(long, value_name = "SUFFIX")]
    pub backup_suffix: Option<String>,

    /// Write files in place instead of through a temporary file
    #[arg(long)]
    pub no_atomic: bool,
}

/// Arguments for the chain command
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Note path (need not exist)
    pub file: PathBuf,

    #[command(flatten)]
    pub vault: VaultOptions,
}

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// File providing the base frontmatter
    pub base: PathBuf,

    /// File whose frontmatter wins scalar conflicts
    pub incoming: PathBuf,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Note path (need not exist)
    pub file: PathBuf,

    #[command(flatten)]
    pub vault: VaultOptions,
}
