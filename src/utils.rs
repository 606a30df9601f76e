use colored::*;
use dsh::shell::error::ShellError;

/// Exit status of `dsh -c` when the line could not be parsed or started.
pub const STATUS_USAGE: i32 = 2;

pub fn report_error(err: &ShellError) {
    eprintln!("{} error: {}", "❌".red(), err);
}

/// Turns colored diagnostics on or off for the whole process.
pub fn set_color(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}
