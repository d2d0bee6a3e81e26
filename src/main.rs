use anyhow::Result;
use clap::Parser;
use wfpatch::{cli, logging};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    let _guard = logging::init(&args)?;
    cli::run(args)
}
