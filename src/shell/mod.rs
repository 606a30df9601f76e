pub mod ast;
pub mod commands;
pub mod context;
pub mod error;
pub mod executor;
pub mod limits;
pub mod parser;

use ast::ParseOutcome;
use context::ShellState;
use error::ShellError;
use executor::execute_pipeline;
use std::io::Write;


/// What the caller should do after a line has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parses and runs one raw input line. Blank lines are a silent no-op.
pub fn run_command_line(line: &str, state: &mut ShellState, stdout: &mut dyn Write) -> Result<Flow, ShellError> {
    match parser::parse_line(line) {
        ParseOutcome::Empty => Ok(Flow::Continue),
        ParseOutcome::TooManyStages => Err(ShellError::TooManyStages),
        ParseOutcome::MalformedStage(e) => Err(e.into()),
        ParseOutcome::Parsed(pipeline) => Ok(execute_pipeline(&pipeline, state, stdout)?),
    }
}
