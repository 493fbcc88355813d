//! Integration tests over real vaults on disk
//!
//! Each test builds a small vault in a temporary directory, loads its
//! settings the way the CLI does, and checks the files after applying.

use matterfold::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SETTINGS: &str = r#"
templateFolder: templates
templates:
  "": templates/root.md
  projects: templates/project.md
  projects/web:
    templatePath: templates/web.md
    excludePatterns: ["README.md"]
  archive: templates/missing.md
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn vault() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, DEFAULT_SETTINGS_FILE, SETTINGS);
    write(root, "templates/root.md", "---\ncreated:\ntags: [note]\n---\n");
    write(
        root,
        "templates/project.md",
        "---\ntags: [project]\nstatus: active\n---\n## Goals\n",
    );
    write(
        root,
        "templates/web.md",
        "---\ntags: [web]\ndelete: [created]\n---\n",
    );

    write(
        root,
        "projects/web/site.md",
        "---\ntitle: Site\nstatus: done\n---\nExisting body\n",
    );
    write(root, "projects/web/README.md", "# Readme\n");
    write(root, "notes/blank.md", "");
    write(root, "archive/old.md", "old\n");
    write(root, ".obsidian/workspace.md", "hidden\n");

    temp_dir
}

#[test]
fn test_apply_folder_whole_vault() {
    let temp_dir = vault();
    let root = temp_dir.path();

    let settings = Settings::load_from_vault(root).unwrap();
    settings.validate().unwrap();
    let loader = FsTemplateLoader::new(root);
    let mut applier = Applier::new(&settings, &loader, &LogNotifier);

    let report = applier.apply_folder(root, root, false).unwrap();
    assert_eq!(report.written.len(), 4);
    assert_eq!(report.skipped.len(), 3);
    assert!(report.errors.is_empty());

    // Three-level chain, delete list from the leaf, file values kept
    assert_eq!(
        read(root, "projects/web/site.md"),
        "---\ntags:\n  - note\n  - project\n  - web\nstatus: done\ntitle: Site\n---\nExisting body\n"
    );

    // Excluded at the web level only
    assert_eq!(
        read(root, "projects/web/README.md"),
        "---\ncreated: \ntags:\n  - note\n  - project\nstatus: active\n---\n# Readme\n"
    );

    assert_eq!(
        read(root, "notes/blank.md"),
        "---\ncreated: \ntags:\n  - note\n---\n"
    );

    // Missing archive template is dropped; the root still applies
    assert_eq!(
        read(root, "archive/old.md"),
        "---\ncreated: \ntags:\n  - note\n---\nold\n"
    );

    // Templates and hidden folders are untouched
    assert_eq!(
        read(root, "templates/web.md"),
        "---\ntags: [web]\ndelete: [created]\n---\n"
    );
    assert_eq!(read(root, ".obsidian/workspace.md"), "hidden\n");
}

#[test]
fn test_apply_twice_changes_nothing() {
    let temp_dir = vault();
    let root = temp_dir.path();

    let settings = Settings::load_from_vault(root).unwrap();
    let loader = FsTemplateLoader::new(root);
    let mut applier = Applier::new(&settings, &loader, &LogNotifier);

    applier.apply_folder(root, root, false).unwrap();
    let first = read(root, "projects/web/site.md");

    let report = applier.apply_folder(root, root, false).unwrap();
    assert!(report.written.is_empty());
    assert_eq!(report.unchanged.len(), 4);
    assert_eq!(read(root, "projects/web/site.md"), first);
}

#[test]
fn test_blank_body_takes_template_body() {
    let temp_dir = vault();
    let root = temp_dir.path();
    write(root, "projects/plan.md", "---\ntitle: Plan\n---\n\n");

    let settings = Settings::load_from_vault(root).unwrap();
    let loader = FsTemplateLoader::new(root);
    let mut applier = Applier::new(&settings, &loader, &LogNotifier);

    applier
        .apply_to_path(root, &root.join("projects/plan.md"), false)
        .unwrap();
    assert_eq!(
        read(root, "projects/plan.md"),
        "---\ncreated: \ntags:\n  - note\n  - project\nstatus: active\ntitle: Plan\n---\n## Goals\n"
    );
}

#[test]
fn test_dry_run_leaves_files_alone() {
    let temp_dir = vault();
    let root = temp_dir.path();

    let settings = Settings::load_from_vault(root).unwrap();
    let loader = FsTemplateLoader::new(root);
    let mut applier = Applier::new(&settings, &loader, &LogNotifier);

    let result = applier
        .apply_to_path(root, &root.join("archive/old.md"), true)
        .unwrap();
    assert!(result.modified);
    assert!(result.output_path.is_none());
    assert!(result.diff.unwrap().contains("+tags:"));
    assert_eq!(read(root, "archive/old.md"), "old\n");
}

#[test]
fn test_backups_when_configured() {
    let temp_dir = vault();
    let root = temp_dir.path();

    let settings = Settings::load_from_vault(root).unwrap();
    let loader = FsTemplateLoader::new(root);
    let writer = DocumentWriter::with_config(WriterConfig {
        backup_enabled: true,
        backup_suffix: Some(".bak".to_string()),
        atomic_writes: true,
    });
    let mut applier = Applier::new(&settings, &loader, &LogNotifier).with_writer(writer);

    let result = applier
        .apply_to_path(root, &root.join("archive/old.md"), false)
        .unwrap();
    assert_eq!(result.backup_path, Some(root.join("archive/old.md.bak")));
    assert_eq!(read(root, "archive/old.md.bak"), "old\n");
}

#[test]
fn test_unconfigured_and_unloaded_are_distinguishable() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        DEFAULT_SETTINGS_FILE,
        "templates:\n  drafts: templates/none.md\n",
    );
    write(root, "top.md", "top\n");
    write(root, "drafts/a.md", "draft\n");

    let settings = Settings::load_from_vault(root).unwrap();
    let loader = FsTemplateLoader::new(root);
    let mut applier = Applier::new(&settings, &loader, &LogNotifier);

    let err = applier
        .apply_to_path(root, &root.join("top.md"), false)
        .unwrap_err();
    assert!(matches!(err, MatterFoldError::NoTemplateConfigured { .. }));

    let err = applier
        .apply_to_path(root, &root.join("drafts/a.md"), false)
        .unwrap_err();
    assert!(matches!(
        err,
        MatterFoldError::NoTemplatesLoaded { attempted: 1, .. }
    ));

    let report = applier.apply_folder(root, root, false).unwrap();
    assert_eq!(report.skipped, vec![root.join("top.md")]);
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(
        report.into_result().unwrap_err(),
        MatterFoldError::Multiple { .. }
    ));

    assert_eq!(read(root, "drafts/a.md"), "draft\n");
}

#[test]
fn test_render_chain_text() {
    let temp_dir = vault();
    let root = temp_dir.path();

    let settings = Settings::load_from_vault(root).unwrap();
    let loader = FsTemplateLoader::new(root);
    let mut applier = Applier::new(&settings, &loader, &LogNotifier);

    let accumulated = applier.render("projects/web/new.md").unwrap();
    assert_eq!(accumulated.template_count, 3);
    assert_eq!(
        accumulated.to_text(),
        "---\ntags:\n  - note\n  - project\n  - web\nstatus: active\n---\n## Goals"
    );
}

#[test]
fn test_invalid_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), DEFAULT_SETTINGS_FILE, "templates: [oops");
    let err = Settings::load_from_vault(temp_dir.path()).unwrap_err();
    assert!(matches!(err, MatterFoldError::Yaml(_)));
}
