use anyhow::{Context, Result};
use colored::*;
use log::debug;
use std::io::{self, BufRead, Write};
use dsh::config::DshConfig;
use crate::handlers::parse::print_parsed_line;
use dsh::shell::context::ShellState;
use dsh::shell::{run_command_line, Flow};
use crate::utils::report_error;

/// Interactive loop: prompt, read a line, run it, until `exit` or end of input.
///
/// Returns the last pipeline status so the process can exit with it.
pub fn handle_repl(config: &DshConfig, dry_run: bool) -> Result<i32> {
    // Ctrl-C should stop the foreground pipeline, not the shell. Children get
    // the default disposition back when they exec.
    ctrlc::set_handler(|| debug!("Interrupt received"))
        .context("Failed to install interrupt handler")?;

    let mut state = ShellState::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut buffer = String::new();

    loop {
        print!("{}", config.prompt());
        io::stdout().flush()?;

        buffer.clear();
        match input.read_line(&mut buffer) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                eprintln!("{} input is not valid UTF-8", "❌".red());
                continue;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("Failed to read input"),
        }
        let line = buffer.trim_end_matches(['\n', '\r']);

        let flow = if dry_run {
            print_parsed_line(line).1
        } else {
            match run_command_line(line, &mut state, &mut io::stdout()) {
                Ok(flow) => flow,
                Err(e) => {
                    report_error(&e);
                    Flow::Continue
                }
            }
        };

        if flow == Flow::Exit {
            println!("exiting...");
            break;
        }
    }

    Ok(state.last_exit_code)
}
