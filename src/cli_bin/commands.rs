//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use anyhow::{bail, Context, Result};
use log::{debug, error, info, warn};
use matterfold::core::block;
use matterfold::io::{read_to_string, relative_path, TemplateLoader};
use matterfold::{
    merge_frontmatter, Applier, DocumentWriter, FsTemplateLoader, LogNotifier, MatterFoldError,
    Settings, WriteResult, WriterConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Execute the apply command
pub fn apply_command(args: ApplyArgs) -> Result<()> {
    debug!("Executing apply command with args: {:?}", args);

    let (vault, settings) = load_vault(&args.vault)?;
    let loader = FsTemplateLoader::new(&vault);
    let writer = DocumentWriter::with_config(WriterConfig {
        backup_enabled: args.backup_suffix.is_some(),
        backup_suffix: args.backup_suffix.clone(),
        atomic_writes: !args.no_atomic,
    });
    let mut applier = Applier::new(&settings, &loader, &LogNotifier).with_writer(writer);

    let mut processed_count = 0;
    let mut failures = Vec::new();

    for path in &args.paths {
        let path = fs::canonicalize(path)
            .with_context(|| format!("Failed to resolve {}", path.display()))?;

        if path.is_dir() {
            let report = applier.apply_folder(&vault, &path, args.dry_run)?;
            for result in &report.written {
                report_write(result, args.dry_run);
            }
            processed_count += report.processed();
            failures.extend(report.errors);
            continue;
        }

        match applier.apply_to_path(&vault, &path, args.dry_run) {
            Ok(result) => {
                processed_count += 1;
                report_write(&result, args.dry_run);
            }
            Err(MatterFoldError::NoTemplateConfigured { .. }) => {}
            Err(e) => failures.push((path, e)),
        }
    }

    info!("Processed {} files", processed_count);

    if !failures.is_empty() {
        for (path, e) in &failures {
            error!("{}: {}", path.display(), e);
        }
        bail!("{} files failed", failures.len());
    }
    Ok(())
}

/// Execute the chain command
pub fn chain_command(args: ChainArgs) -> Result<()> {
    debug!("Executing chain command with args: {:?}", args);

    let (vault, settings) = load_vault(&args.vault)?;
    let loader = FsTemplateLoader::new(&vault);
    let document = document_path(&vault, &args.file)?;

    let chain = settings.resolver().get_template_chain(&document);
    if chain.is_empty() {
        println!("No template configured for {}", document);
        return Ok(());
    }

    for item in &chain.templates {
        let folder = if item.folder_path.is_empty() {
            "/"
        } else {
            item.folder_path.as_str()
        };
        let status = match loader.load(&item.path) {
            Ok(_) => "ok".to_string(),
            Err(e) => format!("unavailable ({})", e),
        };
        println!("{}\t{}\t{}\t{}", item.depth, folder, item.path, status);
    }
    Ok(())
}

/// Execute the merge command
pub fn merge_command(args: MergeArgs) -> Result<()> {
    debug!("Executing merge command with args: {:?}", args);

    let base = read_frontmatter(&args.base)?;
    let incoming = read_frontmatter(&args.incoming)?;
    let result = merge_frontmatter(&base, &incoming);

    println!("{}", block::render_block(&result.merged_text()));
    if !result.conflicts.is_empty() {
        println!("conflicts: {}", result.conflicts.join(", "));
    }
    if !result.added.is_empty() {
        println!("added: {}", result.added.join(", "));
    }
    Ok(())
}

/// Execute the render command
pub fn render_command(args: RenderArgs) -> Result<()> {
    debug!("Executing render command with args: {:?}", args);

    let (vault, settings) = load_vault(&args.vault)?;
    let loader = FsTemplateLoader::new(&vault);
    let document = document_path(&vault, &args.file)?;

    let mut applier = Applier::new(&settings, &loader, &LogNotifier);
    let accumulated = applier.render(&document)?;
    println!("{}", accumulated.to_text());
    Ok(())
}

// Helper functions

fn load_vault(options: &VaultOptions) -> Result<(PathBuf, Settings)> {
    let vault = fs::canonicalize(&options.vault)
        .with_context(|| format!("Vault {} not found", options.vault.display()))?;

    let settings = match &options.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load_from_vault(&vault)
            .with_context(|| format!("Failed to load settings in {}", vault.display()))?,
    };
    settings.validate()?;

    if settings.templates.is_empty() {
        warn!("No folder templates configured");
    }
    Ok((vault, settings))
}

/// Vault-relative path of a note; absolute paths must lie inside the vault
fn document_path(vault: &Path, file: &Path) -> Result<String> {
    if file.is_absolute() {
        Ok(relative_path(vault, file)?)
    } else {
        Ok(file.to_string_lossy().replace('\\', "/"))
    }
}

/// Frontmatter of a note, or the whole file when it has no block
fn read_frontmatter(path: &Path) -> Result<String> {
    let text = read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(block::extract_frontmatter(&text)
        .map(str::to_string)
        .unwrap_or(text))
}

fn report_write(result: &WriteResult, dry_run: bool) {
    if dry_run {
        if let Some(diff) = &result.diff {
            println!("{}", diff);
        }
    } else if let Some(path) = &result.output_path {
        info!("Updated: {}", path.display());
    }
}
