//! Core of the `dsh` shell: line parsing, builtins and pipeline execution.
//!
//! The binary in `main.rs` is a thin read-eval loop around [`shell::run_command_line`].

pub mod config;
pub mod shell;
