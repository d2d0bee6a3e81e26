pub mod args;
pub mod commands;

pub use args::{ListArgs, PatchArgs, RulesArgs, RulesFormat, TargetArgs};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "wfpatch")]
#[command(version = crate::VERSION)]
#[command(about = "Rewrite CI workflow files in place to standardize on pnpm")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Without a subcommand wfpatch runs `patch` on .github/workflows/*.yml in the current directory."
)]
pub struct Args {
    /// Silence console logging
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// The subcommand to run; a bare invocation patches with defaults.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Patch(PatchArgs::default()))
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    #[command(
        about = "Rewrite every workflow file in place",
        long_about = "Patch applies the setup-step, install-command, typo and env-block rewrites to each workflow file and overwrites it. The first unreadable or unwritable file aborts the run.",
        after_help = "Example:\n    wfpatch patch .github/workflows --ext yml"
    )]
    Patch(PatchArgs),
    #[command(
        about = "Show which files patch would rewrite",
        long_about = "List prints the workflow files found in the target directory, one per line, in the order patch processes them.",
        after_help = "Example:\n    wfpatch list --root ../frontend"
    )]
    List(ListArgs),
    #[command(
        about = "Print the effective rule set",
        long_about = "Rules prints the built-in rules merged with wfpatch.toml and environment overrides.",
        after_help = "Example:\n    wfpatch rules --format toml > wfpatch.toml"
    )]
    Rules(RulesArgs),
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command() {
        Command::Patch(patch_args) => commands::patch(patch_args),
        Command::List(list_args) => commands::list(list_args),
        Command::Rules(rules_args) => commands::rules(rules_args),
    }
}
