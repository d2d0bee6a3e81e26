use insta::assert_snapshot;
use std::fs;
use tempfile::TempDir;
use wfpatch::core::{PatcherConfig, WorkflowPatcher};
use wfpatch::utils::discover_workflows;

const CI_WORKFLOW: &str = include_str!("../fixtures/ci.yml");

fn patcher() -> WorkflowPatcher {
    WorkflowPatcher::new(&PatcherConfig::default()).expect("default rules are valid")
}

#[test]
fn test_full_workflow_rewrite() {
    let outcome = patcher().patch_text(CI_WORKFLOW);
    assert_snapshot!("ci_workflow", outcome.content);
}

#[test]
fn test_full_workflow_rewrite_is_idempotent() {
    let patcher = patcher();
    let once = patcher.patch_text(CI_WORKFLOW).content;
    let twice = patcher.patch_text(&once).content;
    assert_eq!(once, twice);
}

#[test]
fn test_untouched_workflow_is_identity() {
    let workflow = "\
name: Docs
on: [push]
jobs:
  docs:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - name: Render
        run: make docs
";
    let outcome = patcher().patch_text(workflow);
    assert_eq!(outcome.content, workflow);
    assert!(outcome.passes.iter().all(|pass| pass.edits == 0));
}

#[test]
fn test_runtime_version_is_carried_over() {
    let workflow = "\
jobs:
  test:
    steps:
      - uses: actions/setup-node@v4
        with:
          node-version: '18.x'
";
    let content = patcher().patch_text(workflow).content;
    assert!(content.contains(
        "      - name: Setup pnpm\n        uses: pnpm/action-setup@v4\n        with:\n          version: 9\n\n      - name: Setup Node.js\n        uses: actions/setup-node@v4\n        with:\n          node-version: '18.x'\n          cache: 'pnpm'\n"
    ));
}

#[test]
fn test_runtime_version_defaults_when_missing() {
    let workflow = "jobs:\n  test:\n    steps:\n      - uses: actions/setup-node@v4\n";
    let content = patcher().patch_text(workflow).content;
    assert!(content.contains("          node-version: '20.x'\n"));
}

#[test]
fn test_typo_fixed_in_unrelated_lines() {
    let workflow = "# Installs ppnpm first\nname: ppnpm-check\n";
    let content = patcher().patch_text(workflow).content;
    assert_eq!(content, "# Installs pnpm first\nname: pnpm-check\n");
}

#[test]
fn test_existing_env_block_fully_replaced() {
    let workflow = "\
jobs:
  check:
    steps:
      - name: Type check
        run: pnpm run type-check
        env:
          OLD_ONE: 1
          OLD_TWO: 2
";
    let content = patcher().patch_text(workflow).content;
    assert!(!content.contains("OLD_"));
    let entries: Vec<&str> = content
        .lines()
        .skip_while(|line| line.trim() != "env:")
        .skip(1)
        .collect();
    assert_eq!(entries.len(), 7);
    assert!(entries.iter().all(|line| line.starts_with("          ")));
    assert!(entries[0].starts_with("          NEXT_PUBLIC_SUPABASE_PWA4_URL: "));
    assert!(entries[6].starts_with("          NEXT_PUBLIC_SITE_URL: "));
}

#[test]
fn test_patch_directory_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let workflows = temp_dir.path().join(".github").join("workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(workflows.join("ci.yml"), CI_WORKFLOW).unwrap();
    fs::write(workflows.join("docs.yml"), "name: Docs\n").unwrap();
    fs::write(workflows.join("notes.txt"), "run: npm ci\n").unwrap();

    let patcher = patcher();
    let targets = discover_workflows(&workflows, "yml").unwrap();
    let reports = patcher.patch_all(&targets).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports[0].changed);
    assert!(!reports[1].changed);
    assert_eq!(
        fs::read_to_string(workflows.join("ci.yml")).unwrap(),
        patcher.patch_text(CI_WORKFLOW).content
    );
    assert_eq!(fs::read_to_string(workflows.join("docs.yml")).unwrap(), "name: Docs\n");
    assert_eq!(
        fs::read_to_string(workflows.join("notes.txt")).unwrap(),
        "run: npm ci\n"
    );
}

#[test]
fn test_fixture_rules_replace_defaults() {
    let mut config = PatcherConfig::default();
    config.env.targets = vec!["cargo test".to_string()];
    config.env.vars = vec![wfpatch::core::config::EnvVar::new("DATABASE_URL", "sqlite::memory:")];
    config.typos.clear();

    let patcher = WorkflowPatcher::new(&config).unwrap();
    let content = patcher
        .patch_text("steps:\n  - run: cargo test\n  - run: pnpm test # ppnpm\n")
        .content;
    assert_eq!(
        content,
        "steps:\n  - run: cargo test\n    env:\n      DATABASE_URL: ${{ secrets.DATABASE_URL || 'sqlite::memory:' }}\n  - run: pnpm test # ppnpm\n"
    );
}
