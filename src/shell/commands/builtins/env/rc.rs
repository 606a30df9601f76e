// Rc command: status of the last external pipeline

use crate::shell::commands::Builtin;
use crate::shell::context::ShellState;
use crate::shell::Flow;
use anyhow::Result;
use std::io::Write;

pub struct RcCommand;
impl Builtin for RcCommand {
    fn execute(&self, _args: &[String], state: &mut ShellState, stdout: &mut dyn Write) -> Result<Flow> {
        writeln!(stdout, "{}", state.last_exit_code)?;
        stdout.flush()?;
        Ok(Flow::Continue)
    }
}
