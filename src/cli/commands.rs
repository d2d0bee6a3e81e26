use crate::{
    cli::args::{ListArgs, PatchArgs, RulesArgs, RulesFormat, TargetArgs},
    core::{ConfigLoader, PatcherConfig, WorkflowPatcher},
    utils::files::discover_workflows,
    Result,
};
use anyhow::Context;
use std::path::PathBuf;

/// Handles `wfpatch patch`: rewrite every workflow file in place.
pub fn patch(args: PatchArgs) -> Result<()> {
    let config = load_config(&args.target)?;
    let targets = resolve_targets(&args.target, &config)?;
    let patcher = WorkflowPatcher::new(&config).context("failed to build rewrite passes")?;

    tracing::info!(count = targets.len(), "patching workflow files");
    let reports = patcher.patch_all(&targets)?;

    let mut changed = 0;
    for report in reports.iter().filter(|report| report.changed) {
        changed += 1;
        println!(
            "patched {} ({} edits)",
            report.path.display(),
            report.total_edits()
        );
    }
    println!("{} of {} workflow files changed", changed, reports.len());
    Ok(())
}

/// Handles `wfpatch list`: print the files `patch` would process.
pub fn list(args: ListArgs) -> Result<()> {
    let config = load_config(&args.target)?;
    for path in resolve_targets(&args.target, &config)? {
        println!("{}", path.display());
    }
    Ok(())
}

/// Handles `wfpatch rules`: print the effective rule set.
pub fn rules(args: RulesArgs) -> Result<()> {
    let config = ConfigLoader::load(&args.root, args.config.as_deref())?;
    print!("{}", render_rules(&config, args.format)?);
    Ok(())
}

fn render_rules(config: &PatcherConfig, format: RulesFormat) -> Result<String> {
    match format {
        RulesFormat::Yaml => {
            serde_yaml::to_string(config).context("failed to serialize rules as YAML")
        }
        RulesFormat::Toml => {
            toml::to_string_pretty(config).context("failed to serialize rules as TOML")
        }
    }
}

fn load_config(target: &TargetArgs) -> Result<PatcherConfig> {
    let config = ConfigLoader::load(&target.root, target.config.as_deref())?;
    Ok(config)
}

fn resolve_targets(target: &TargetArgs, config: &PatcherConfig) -> Result<Vec<PathBuf>> {
    let dir = target
        .dir
        .clone()
        .unwrap_or_else(|| target.root.join(&config.workspace.workflow_dir));
    let extension = target
        .extension
        .as_deref()
        .unwrap_or(&config.workspace.extension);
    let targets = discover_workflows(&dir, extension)?;
    Ok(targets)
}
