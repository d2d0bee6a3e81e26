use clap::Args;
use std::path::PathBuf;

/// Where to find workflow files and rules. Shared by `patch` and `list`.
#[derive(Args, Clone, Debug)]
pub struct TargetArgs {
    /// Directory holding workflow files (default: <ROOT>/.github/workflows)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Workspace root that holds wfpatch.toml and the workflow directory
    #[arg(long, default_value = ".", value_name = "PATH")]
    pub root: PathBuf,

    /// Workflow file extension (default: yml)
    #[arg(long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Path to a rules file (default: <ROOT>/wfpatch.toml when present)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

impl Default for TargetArgs {
    fn default() -> Self {
        TargetArgs {
            dir: None,
            root: PathBuf::from("."),
            extension: None,
            config: None,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct PatchArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args, Clone, Debug)]
pub struct RulesArgs {
    /// Workspace root that holds wfpatch.toml
    #[arg(long, default_value = ".", value_name = "PATH")]
    pub root: PathBuf,

    /// Path to a rules file (default: <ROOT>/wfpatch.toml when present)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Emit the rule set as YAML or as a TOML file ready to edit
    #[arg(long, default_value = "yaml", value_name = "FORMAT")]
    pub format: RulesFormat,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum RulesFormat {
    /// YAML, matching the workflow files being edited
    Yaml,
    /// TOML, usable as a starting wfpatch.toml
    Toml,
}
