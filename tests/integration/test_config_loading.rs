use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wfpatch::core::config::{ConfigLoader, ReplaceRule};
use wfpatch::core::{PatchError, PatcherConfig, WorkflowPatcher};

fn clear_wfpatch_env() {
    for v in &["WFPATCH_WORKFLOW_DIR", "WFPATCH_EXTENSION"] {
        env::remove_var(v);
    }
}

#[test]
#[serial]
fn test_workspace_rules_drive_the_patcher() {
    clear_wfpatch_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("wfpatch.toml"),
        r#"
[package_manager]
version = "10"

[runtime]
default_version = "'22.x'"

[[install]]
from = "run: yarn install --frozen-lockfile"
to = "run: pnpm install --frozen-lockfile"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    assert_eq!(
        config.install,
        vec![ReplaceRule::new(
            "run: yarn install --frozen-lockfile",
            "run: pnpm install --frozen-lockfile"
        )]
    );

    let patcher = WorkflowPatcher::new(&config).unwrap();
    let content = patcher
        .patch_text(
            "steps:\n  - uses: actions/setup-node@v4\n  - run: yarn install --frozen-lockfile\n  - run: npm ci\n",
        )
        .content;

    assert!(content.contains("      version: 10\n"));
    assert!(content.contains("      node-version: '22.x'\n"));
    assert!(content.contains("  - run: pnpm install --frozen-lockfile\n"));
    // Default install rules were replaced, so npm ci stays.
    assert!(content.contains("  - run: npm ci\n"));
}

#[test]
#[serial]
fn test_env_overrides_apply_to_workspace_settings() {
    clear_wfpatch_env();
    let temp_dir = TempDir::new().unwrap();
    env::set_var("WFPATCH_WORKFLOW_DIR", "ci/pipelines");
    let config = ConfigLoader::load_from_workspace(temp_dir.path());
    clear_wfpatch_env();

    let config = config.unwrap();
    assert_eq!(config.workspace.workflow_dir, PathBuf::from("ci/pipelines"));
    assert_eq!(config.workspace.extension, "yml");
}

#[test]
#[serial]
fn test_broken_rules_file_is_reported() {
    clear_wfpatch_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("wfpatch.toml"), "[[install]]\nfrom = 1\n").unwrap();

    let err = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap_err();
    assert!(matches!(err, PatchError::ConfigParse { .. }));
    assert!(err.to_string().contains("wfpatch.toml"));
}

#[test]
fn test_documented_env_vars_match_overrides() {
    let docs = ConfigLoader::env_var_documentation();
    assert!(docs.iter().any(|line| line.starts_with("WFPATCH_WORKFLOW_DIR")));
    assert!(docs.iter().any(|line| line.starts_with("WFPATCH_EXTENSION")));
    assert_eq!(PatcherConfig::default().workspace.extension, "yml");
}
