use colored::*;
use dsh::shell::ast::ParseOutcome;
use dsh::shell::error::ShellError;
use dsh::shell::parser::parse_line;
use dsh::shell::Flow;

/// Parse-only evaluation: prints what `line` would run.
///
/// Returns whether the line parsed, and whether it asked to leave.
pub fn print_parsed_line(line: &str) -> (bool, Flow) {
    match parse_line(line) {
        ParseOutcome::Parsed(pipeline) => {
            print!("{}", pipeline);
            let first = pipeline.first();
            if pipeline.len() == 1 && first.executable == "exit" {
                return (true, Flow::Exit);
            }
            (true, Flow::Continue)
        }
        ParseOutcome::Empty => {
            println!("{} warning: no commands provided", "⚠️".yellow());
            (true, Flow::Continue)
        }
        ParseOutcome::TooManyStages => {
            crate::utils::report_error(&ShellError::TooManyStages);
            (false, Flow::Continue)
        }
        ParseOutcome::MalformedStage(e) => {
            crate::utils::report_error(&e.into());
            (false, Flow::Continue)
        }
    }
}
