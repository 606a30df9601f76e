// Fixed capacities. Exceeding any of them is a parse error, never a truncation.

/// Maximum number of stages in one pipeline.
pub const MAX_STAGES: usize = 8;

/// Maximum argv entries (executable plus arguments) in one stage.
pub const ARGV_MAX: usize = 8;

/// The executable name must be shorter than this many bytes.
pub const EXE_MAX: usize = 64;

/// The argument text, joined by single spaces, must be shorter than this many bytes.
pub const ARG_MAX: usize = 256;

/// Maximum length in bytes of a raw input line.
pub const LINE_MAX: usize = MAX_STAGES * (EXE_MAX + ARG_MAX);
