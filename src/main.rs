mod cli;
mod handlers;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use dsh::config::load_config;
use handlers::{command, repl};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    utils::set_color(config.color());

    let code = if let Some(line) = &cli.command {
        command::handle_command(line, cli.dry_run)?
    } else {
        repl::handle_repl(&config, cli.dry_run)?
    };

    std::process::exit(code);
}
