use std::fmt;
use std::path::PathBuf;
use crate::shell::error::StageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Truncate, // >
    Append,   // >>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRedirect {
    pub path: PathBuf,
    pub mode: RedirectMode,
}

impl OutputRedirect {
    pub fn truncate(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), mode: RedirectMode::Truncate }
    }

    pub fn append(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), mode: RedirectMode::Append }
    }
}

/// One segment of a pipe chain: "sort -r < in.txt"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStage {
    pub executable: String,
    pub args: Vec<String>,
    pub input_redirect: Option<PathBuf>,
    pub output_redirect: Option<OutputRedirect>,
}

impl CommandStage {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            input_redirect: None,
            output_redirect: None,
        }
    }

    pub fn has_redirects(&self) -> bool {
        self.input_redirect.is_some() || self.output_redirect.is_some()
    }
}

/// Ordered stages of one input line. Never empty, never longer than `MAX_STAGES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPipeline {
    stages: Vec<CommandStage>,
}

// Never empty, so there is no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl CommandPipeline {
    // Callers (the pipeline builder) guarantee 1..=MAX_STAGES stages.
    pub(crate) fn from_stages(stages: Vec<CommandStage>) -> Self {
        debug_assert!(!stages.is_empty());
        Self { stages }
    }

    pub fn stages(&self) -> &[CommandStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn first(&self) -> &CommandStage {
        &self.stages[0]
    }
}

/// Result of turning one raw line into a pipeline.
#[derive(Debug, PartialEq)]
pub enum ParseOutcome {
    Parsed(CommandPipeline),
    Empty,
    TooManyStages,
    MalformedStage(StageError),
}

// Listing format of the parse-only mode:
// PARSED COMMAND LINE - TOTAL COMMANDS 2
// <1> ls [-la]
// <2> grep [".rs file"]
impl fmt::Display for CommandPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PARSED COMMAND LINE - TOTAL COMMANDS {}", self.stages.len())?;
        for (i, stage) in self.stages.iter().enumerate() {
            write!(f, "<{}> {}", i + 1, stage.executable)?;
            if !stage.args.is_empty() {
                write!(f, " [{}]", shell_words::join(&stage.args))?;
            }
            if let Some(input) = &stage.input_redirect {
                write!(f, " < {}", input.display())?;
            }
            if let Some(output) = &stage.output_redirect {
                let op = match output.mode {
                    RedirectMode::Truncate => ">",
                    RedirectMode::Append => ">>",
                };
                write!(f, " {} {}", op, output.path.display())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
