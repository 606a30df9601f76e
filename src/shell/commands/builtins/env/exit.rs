// Exit command

use crate::shell::commands::Builtin;
use crate::shell::context::ShellState;
use crate::shell::Flow;
use anyhow::Result;
use std::io::Write;

pub struct ExitCommand;
impl Builtin for ExitCommand {
    // Stopping the session is up to the caller; nothing is torn down here.
    fn execute(&self, _args: &[String], _state: &mut ShellState, _stdout: &mut dyn Write) -> Result<Flow> {
        Ok(Flow::Exit)
    }
}
