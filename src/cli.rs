use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dsh", version, about = "dsh: a small pipeline shell")]
pub struct Cli {
    /// Run a single command line and exit with its status
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Parse only: print the stages a line would run, without running them
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Config file (defaults to $DSH_CONFIG, then ./dsh.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
