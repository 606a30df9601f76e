pub mod builtins;

use crate::shell::ast::CommandStage;
use crate::shell::context::ShellState;
use crate::shell::Flow;
use anyhow::Result;
use colored::*;
use log::warn;
use std::io::Write;

/// A command that runs inside the shell process and is never forked.
pub trait Builtin: Send + Sync {
    /// `args[0]` is the command name.
    fn execute(&self, args: &[String], state: &mut ShellState, stdout: &mut dyn Write) -> Result<Flow>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    NotBuiltin,
    Executed,
    Exit,
}

/// Runs `stage` in-process if its executable names a builtin.
///
/// A failing builtin is reported on stderr and still counts as executed; it
/// never touches `last_exit_code`.
pub fn dispatch_builtin(stage: &CommandStage, state: &mut ShellState, stdout: &mut dyn Write) -> Dispatch {
    let registry = state.registry.clone();
    let Some(cmd) = registry.get(&stage.executable) else {
        return Dispatch::NotBuiltin;
    };

    if stage.has_redirects() {
        warn!("Redirections are ignored for builtin '{}'", stage.executable);
    }

    let mut argv = Vec::with_capacity(stage.args.len() + 1);
    argv.push(stage.executable.clone());
    argv.extend(stage.args.iter().cloned());

    match cmd.execute(&argv, state, stdout) {
        Ok(Flow::Exit) => Dispatch::Exit,
        Ok(Flow::Continue) => Dispatch::Executed,
        Err(e) => {
            eprintln!("{} {}: {:#}", "❌".red(), stage.executable, e);
            Dispatch::Executed
        }
    }
}
