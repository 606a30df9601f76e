// Cd command

use crate::shell::commands::Builtin;
use crate::shell::context::ShellState;
use crate::shell::Flow;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

pub struct CdCommand;
impl Builtin for CdCommand {
    fn execute(&self, args: &[String], state: &mut ShellState, _stdout: &mut dyn Write) -> Result<Flow> {
        // args[0] is "cd". args[1] is path, anything after it is ignored.
        let target = match args.get(1) {
            Some(path) => PathBuf::from(path),
            None => state.home.clone().context("HOME is not set")?,
        };

        state
            .change_dir(&target)
            .with_context(|| format!("cd failed: {}", target.display()))?;
        Ok(Flow::Continue)
    }
}
