use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const CI_WORKFLOW: &str = include_str!("../fixtures/ci.yml");

fn wfpatch() -> Command {
    let mut cmd = Command::cargo_bin("wfpatch").expect("binary should build");
    cmd.env_remove("WFPATCH_WORKFLOW_DIR")
        .env_remove("WFPATCH_EXTENSION")
        .env_remove("WFPATCH_LOG_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace_with_workflow(temp_dir: &TempDir) -> std::path::PathBuf {
    let workflows = temp_dir.path().join(".github").join("workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(workflows.join("ci.yml"), CI_WORKFLOW).unwrap();
    workflows
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_bare_invocation_patches_default_directory() {
    let temp_dir = TempDir::new().unwrap();
    let workflows = workspace_with_workflow(&temp_dir);

    wfpatch()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 workflow files changed"));

    let patched = read(&workflows.join("ci.yml"));
    assert!(patched.contains("run: pnpm install --frozen-lockfile"));
    assert!(patched.contains("uses: pnpm/action-setup@v4"));
}

#[test]
fn test_second_run_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    workspace_with_workflow(&temp_dir);

    wfpatch()
        .arg("patch")
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .success();
    wfpatch()
        .arg("patch")
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 1 workflow files changed"));
}

#[test]
fn test_list_prints_targets_only() {
    let temp_dir = TempDir::new().unwrap();
    let workflows = workspace_with_workflow(&temp_dir);
    fs::write(workflows.join("release.yml"), "name: Release\n").unwrap();
    fs::write(workflows.join("README.md"), "# workflows\n").unwrap();

    wfpatch()
        .arg("list")
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ci.yml"))
        .stdout(predicate::str::contains("release.yml"))
        .stdout(predicate::str::contains("README.md").not());

    assert_eq!(read(&workflows.join("ci.yml")), CI_WORKFLOW);
}

#[test]
fn test_missing_workflow_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    wfpatch()
        .arg("--quiet")
        .arg("patch")
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to list workflow directory"));
}

#[test]
fn test_explicit_dir_and_extension() {
    let temp_dir = TempDir::new().unwrap();
    let pipelines = temp_dir.path().join("pipelines");
    fs::create_dir_all(&pipelines).unwrap();
    fs::write(pipelines.join("build.yaml"), "steps:\n  - run: npm ci\n").unwrap();

    wfpatch()
        .arg("patch")
        .arg(&pipelines)
        .arg("--ext")
        .arg("yaml")
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .success();

    assert_eq!(
        read(&pipelines.join("build.yaml")),
        "steps:\n  - run: pnpm install --frozen-lockfile\n"
    );
}

#[test]
fn test_rules_prints_effective_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("wfpatch.toml"),
        "[package_manager]\nversion = \"10\"\n",
    )
    .unwrap();

    wfpatch()
        .arg("rules")
        .arg("--format")
        .arg("toml")
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("version = \"10\""))
        .stdout(predicate::str::contains("STRIPE_WEBHOOK_SECRET"));
}

#[test]
fn test_invalid_rules_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    workspace_with_workflow(&temp_dir);
    fs::write(
        temp_dir.path().join("wfpatch.toml"),
        "[[typos]]\nfrom = \"\"\nto = \"pnpm\"\n",
    )
    .unwrap();

    wfpatch()
        .arg("patch")
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));

    let workflows = temp_dir.path().join(".github").join("workflows");
    assert_eq!(read(&workflows.join("ci.yml")), CI_WORKFLOW);
}

#[test]
fn test_help_lists_commands() {
    wfpatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMANDS"))
        .stdout(predicate::str::contains("patch"))
        .stdout(predicate::str::contains("rules"));
}
