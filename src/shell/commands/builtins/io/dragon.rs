// Dragon command

use crate::shell::commands::Builtin;
use crate::shell::context::ShellState;
use crate::shell::Flow;
use anyhow::Result;
use std::io::Write;

pub const DRAGON_ART: &str = include_str!("dragon.txt");

pub struct DragonCommand;
impl Builtin for DragonCommand {
    fn execute(&self, _args: &[String], _state: &mut ShellState, stdout: &mut dyn Write) -> Result<Flow> {
        stdout.write_all(DRAGON_ART.as_bytes())?;
        stdout.flush()?;
        Ok(Flow::Continue)
    }
}
