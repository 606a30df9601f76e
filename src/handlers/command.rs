use anyhow::Result;
use std::io;
use crate::handlers::parse::print_parsed_line;
use dsh::shell::context::ShellState;
use dsh::shell::run_command_line;
use crate::utils::{report_error, STATUS_USAGE};

/// `dsh -c LINE`: runs one line and returns the status to exit with.
pub fn handle_command(line: &str, dry_run: bool) -> Result<i32> {
    if dry_run {
        let (ok, _) = print_parsed_line(line);
        return Ok(if ok { 0 } else { STATUS_USAGE });
    }

    let mut state = ShellState::new();
    match run_command_line(line, &mut state, &mut io::stdout()) {
        Ok(_) => Ok(state.last_exit_code),
        Err(e) => {
            report_error(&e);
            Ok(STATUS_USAGE)
        }
    }
}
