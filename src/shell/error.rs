use std::io;
use std::path::PathBuf;
use thiserror::Error;
use crate::shell::limits::{ARG_MAX, ARGV_MAX, EXE_MAX, LINE_MAX, MAX_STAGES};

/// Why a single segment could not be turned into a stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("command or arguments too big: {0}")]
    CmdOrArgsTooBig(TooBig),

    #[error("missing file name after `{0}`")]
    MissingRedirectTarget(String),

    #[error("missing command name")]
    MissingCommand,

    #[error("input line too long ({len} bytes, limit is {max})", max = LINE_MAX)]
    LineTooLong { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooBig {
    Executable(usize),
    Arguments(usize),
    TooManyArgs(usize),
}

impl std::fmt::Display for TooBig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TooBig::Executable(len) => write!(f, "executable is {} bytes, limit is {}", len, EXE_MAX - 1),
            TooBig::Arguments(len) => write!(f, "arguments are {} bytes, limit is {}", len, ARG_MAX - 1),
            TooBig::TooManyArgs(count) => write!(f, "{} words, limit is {}", count, ARGV_MAX),
        }
    }
}

/// Failure of the pipe or fork primitives. Aborts the pipeline, never the shell.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to create pipe: {0}")]
    Pipe(#[source] io::Error),

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("piping limited to {max} commands", max = MAX_STAGES)]
    TooManyStages,

    #[error(transparent)]
    Malformed(#[from] StageError),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Why one stage never started. Confined to that stage: it is reported, given
/// a failure status, and its siblings keep running.
#[derive(Debug, Error)]
pub enum ExecFailure {
    #[error("command not found in PATH")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("command execution failed: {0}")]
    Launch(#[source] io::Error),

    #[error("failed to open {}: {source}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// Shell-conventional statuses for stages that never ran.
pub const STATUS_NOT_FOUND: i32 = 127;
pub const STATUS_NOT_EXECUTABLE: i32 = 126;
pub const STATUS_REDIRECT_FAILED: i32 = 1;

impl ExecFailure {
    pub fn status(&self) -> i32 {
        match self {
            ExecFailure::NotFound => STATUS_NOT_FOUND,
            ExecFailure::PermissionDenied | ExecFailure::Launch(_) => STATUS_NOT_EXECUTABLE,
            ExecFailure::Redirect { .. } => STATUS_REDIRECT_FAILED,
        }
    }
}
