use crate::shell::ast::{CommandPipeline, CommandStage, OutputRedirect, ParseOutcome, RedirectMode};
use crate::shell::error::{StageError, TooBig};
use crate::shell::limits::{ARG_MAX, ARGV_MAX, EXE_MAX, LINE_MAX, MAX_STAGES};
use log::debug;
use std::path::PathBuf;

pub const PIPE_CHAR: char = '|';

#[derive(Debug, PartialEq)]
struct Token {
    text: String,
    // Any part of the token came from a "..." span. Quoted tokens are never operators.
    quoted: bool,
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn tokenize(segment: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_token = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    // Distinguishes an explicit empty token ("") from plain whitespace.
    let mut token_started = false;

    for c in segment.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            quoted = true;
            token_started = true;
            continue;
        }

        if is_separator(c) && !in_quotes {
            if token_started {
                tokens.push(Token { text: std::mem::take(&mut current_token), quoted });
                token_started = false;
                quoted = false;
            }
            continue;
        }

        current_token.push(c);
        token_started = true;
    }

    // An unterminated quote simply runs to the end of the segment.
    if token_started {
        tokens.push(Token { text: current_token, quoted });
    }

    tokens
}

enum Redirect {
    Input,
    Output(RedirectMode),
}

fn as_redirect(token: &Token) -> Option<Redirect> {
    if token.quoted {
        return None;
    }
    match token.text.as_str() {
        "<" => Some(Redirect::Input),
        ">" => Some(Redirect::Output(RedirectMode::Truncate)),
        ">>" => Some(Redirect::Output(RedirectMode::Append)),
        _ => None,
    }
}

/// Parses one pipe-free segment into a stage.
pub fn parse_stage(segment: &str) -> Result<CommandStage, StageError> {
    let mut words = Vec::new();
    let mut input_redirect: Option<PathBuf> = None;
    let mut output_redirect: Option<OutputRedirect> = None;

    let mut tokens = tokenize(segment).into_iter();
    while let Some(token) = tokens.next() {
        match as_redirect(&token) {
            Some(redirect) => {
                let target = tokens
                    .next()
                    .ok_or_else(|| StageError::MissingRedirectTarget(token.text.clone()))?;
                // Repeated redirects of one direction: the last one wins.
                match redirect {
                    Redirect::Input => input_redirect = Some(target.text.into()),
                    Redirect::Output(mode) => {
                        output_redirect = Some(OutputRedirect { path: target.text.into(), mode })
                    }
                }
            }
            None => words.push(token.text),
        }
    }

    if words.len() > ARGV_MAX {
        return Err(StageError::CmdOrArgsTooBig(TooBig::TooManyArgs(words.len())));
    }

    let mut words = words.into_iter();
    let executable = match words.next() {
        Some(exe) if !exe.is_empty() => exe,
        _ => return Err(StageError::MissingCommand),
    };
    if executable.len() >= EXE_MAX {
        return Err(StageError::CmdOrArgsTooBig(TooBig::Executable(executable.len())));
    }

    let args: Vec<String> = words.collect();
    let arg_text_len = args.iter().map(String::len).sum::<usize>() + args.len().saturating_sub(1);
    if arg_text_len >= ARG_MAX {
        return Err(StageError::CmdOrArgsTooBig(TooBig::Arguments(arg_text_len)));
    }

    Ok(CommandStage {
        executable,
        args,
        input_redirect,
        output_redirect,
    })
}

/// Splits a raw line on `|` and parses every non-blank segment.
///
/// The pipe splits unconditionally, even inside quotes, and blank segments
/// (`a || b`, a trailing `|`) are skipped without counting as stages.
pub fn parse_line(line: &str) -> ParseOutcome {
    let line = line.trim();
    if line.is_empty() {
        return ParseOutcome::Empty;
    }
    if line.len() > LINE_MAX {
        return ParseOutcome::MalformedStage(StageError::LineTooLong { len: line.len() });
    }

    let mut stages = Vec::new();
    for segment in line.split(PIPE_CHAR) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if stages.len() == MAX_STAGES {
            return ParseOutcome::TooManyStages;
        }
        match parse_stage(segment) {
            Ok(stage) => stages.push(stage),
            Err(e) => return ParseOutcome::MalformedStage(e),
        }
    }

    if stages.is_empty() {
        return ParseOutcome::Empty;
    }

    debug!("Parsed {} stage(s) from {:?}", stages.len(), line);
    ParseOutcome::Parsed(CommandPipeline::from_stages(stages))
}
