use crate::shell::ast::{CommandPipeline, CommandStage, OutputRedirect, RedirectMode};
use crate::shell::commands::{dispatch_builtin, Dispatch};
use crate::shell::context::ShellState;
use crate::shell::error::{ExecError, ExecFailure};
use crate::shell::Flow;
use colored::*;
use log::{debug, warn};
use os_pipe::{pipe, PipeReader, PipeWriter};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

// A stage either got a process or failed locally with a known status.
enum StageRun {
    Running(Child),
    Finished(i32),
}

/// Runs every stage of `pipeline` and records the last stage's status.
///
/// A one-stage pipeline naming a builtin runs in-process and leaves
/// `last_exit_code` alone. Otherwise one process is spawned per stage, in
/// index order, and all of them are reaped in index order before returning.
/// Stage failures (missing program, unreadable redirect) only show up as that
/// stage's status; pipe or fork failures abort the pipeline with an error.
pub fn execute_pipeline(
    pipeline: &CommandPipeline,
    state: &mut ShellState,
    stdout: &mut dyn Write,
) -> Result<Flow, ExecError> {
    if pipeline.len() == 1 {
        match dispatch_builtin(pipeline.first(), state, stdout) {
            Dispatch::Exit => return Ok(Flow::Exit),
            Dispatch::Executed => return Ok(Flow::Continue),
            Dispatch::NotBuiltin => {}
        }
    }

    // Builtin output written earlier in the session must not trail the children's.
    if let Err(e) = stdout.flush() {
        warn!("Failed to flush builtin output: {}", e);
    }

    let stages = pipeline.stages();
    let last = stages.len() - 1;

    // pipe i carries stage i's stdout into stage i + 1's stdin. Both ends are
    // close-on-exec, so a child only keeps the ends dup'ed onto its stdio.
    let mut readers: Vec<Option<PipeReader>> = Vec::with_capacity(last);
    let mut writers: Vec<Option<PipeWriter>> = Vec::with_capacity(last);
    for _ in 0..last {
        let (reader, writer) = pipe().map_err(ExecError::Pipe)?;
        readers.push(Some(reader));
        writers.push(Some(writer));
    }

    let mut runs = Vec::with_capacity(stages.len());
    for (index, stage) in stages.iter().enumerate() {
        let pipe_in = if index == 0 { None } else { readers[index - 1].take() };
        let pipe_out = if index == last { None } else { writers[index].take() };

        match spawn_stage(stage, index, last, pipe_in, pipe_out, state) {
            Ok(run) => runs.push(run),
            Err(e) => {
                warn!("Aborting pipeline at stage {}: {}", index + 1, e);
                // Close the parent's remaining ends first, or the spawned
                // children never see EOF and the reap below hangs.
                drop(readers);
                drop(writers);
                reap(runs);
                return Err(e);
            }
        }
    }

    let mut last_status = 0;
    for (index, run) in runs.into_iter().enumerate() {
        let status = match run {
            StageRun::Finished(code) => code,
            StageRun::Running(mut child) => match child.wait() {
                Ok(status) => exit_code(status),
                Err(e) => {
                    warn!("Failed to wait for stage {} (pid {}): {}", index + 1, child.id(), e);
                    1
                }
            },
        };
        debug!("Stage {} '{}' exited with {}", index + 1, stages[index].executable, status);
        if index == last {
            last_status = status;
        }
    }

    state.record_exit(last_status);
    Ok(Flow::Continue)
}

fn spawn_stage(
    stage: &CommandStage,
    index: usize,
    last: usize,
    pipe_in: Option<PipeReader>,
    pipe_out: Option<PipeWriter>,
    state: &ShellState,
) -> Result<StageRun, ExecError> {
    if index != 0 && stage.input_redirect.is_some() {
        warn!("Ignoring input redirect of stage {} '{}'", index + 1, stage.executable);
    }
    if index != last && stage.output_redirect.is_some() {
        warn!("Ignoring output redirect of stage {} '{}'", index + 1, stage.executable);
    }

    // Returning early drops whatever pipe ends this stage was handed, which
    // is what lets its neighbours see EOF or a broken pipe.
    let stdin = match (index, &stage.input_redirect) {
        (0, Some(path)) => {
            let path = state.resolve_path(path);
            match File::open(&path) {
                Ok(file) => Stdio::from(file),
                Err(source) => return Ok(stage_failed(stage, ExecFailure::Redirect { path, source })),
            }
        }
        _ => pipe_in.map(Stdio::from).unwrap_or_else(Stdio::inherit),
    };

    let stdout = match &stage.output_redirect {
        Some(redirect) if index == last => match open_output(state, redirect) {
            Ok(file) => Stdio::from(file),
            Err(failure) => return Ok(stage_failed(stage, failure)),
        },
        _ => pipe_out.map(Stdio::from).unwrap_or_else(Stdio::inherit),
    };

    let program = match locate(&stage.executable, state) {
        Ok(path) => path,
        Err(failure) => return Ok(stage_failed(stage, failure)),
    };

    let mut cmd = Command::new(&program);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.arg0(&stage.executable);
    }
    cmd.args(&stage.args)
        .current_dir(&state.cwd)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::inherit());

    // `cmd` owns this stage's pipe ends and closes the parent's copies when it
    // goes out of scope right after the spawn.
    match cmd.spawn() {
        Ok(child) => {
            debug!("Spawned stage {} '{}' as pid {}", index + 1, program.display(), child.id());
            Ok(StageRun::Running(child))
        }
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(stage_failed(stage, ExecFailure::NotFound)),
            ErrorKind::PermissionDenied => Ok(stage_failed(stage, ExecFailure::PermissionDenied)),
            // Out of processes or memory: nothing later in the chain can start either.
            ErrorKind::WouldBlock | ErrorKind::OutOfMemory => Err(ExecError::Spawn {
                program: stage.executable.clone(),
                source: e,
            }),
            _ => Ok(stage_failed(stage, ExecFailure::Launch(e))),
        },
    }
}

fn open_output(state: &ShellState, redirect: &OutputRedirect) -> Result<File, ExecFailure> {
    let path = state.resolve_path(&redirect.path);
    let mut open_opts = OpenOptions::new();
    open_opts.write(true).create(true);
    match redirect.mode {
        RedirectMode::Truncate => { open_opts.truncate(true); },
        RedirectMode::Append => { open_opts.append(true); },
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        open_opts.mode(0o644);
    }
    open_opts.open(&path).map_err(|source| ExecFailure::Redirect { path, source })
}

/// Finds the program for `executable` the way `execvp` would: names with a
/// slash are paths, anything else is searched on the shell's search path.
fn locate(executable: &str, state: &ShellState) -> Result<PathBuf, ExecFailure> {
    if executable.contains('/') {
        return Ok(state.resolve_path(Path::new(executable)));
    }
    which::which_in(executable, state.search_path.as_ref(), &state.cwd).map_err(|_| {
        // `which` skips files without the execute bit; execvp reports those as EACCES.
        if shadowed_by_non_executable(executable, state) {
            ExecFailure::PermissionDenied
        } else {
            ExecFailure::NotFound
        }
    })
}

fn shadowed_by_non_executable(executable: &str, state: &ShellState) -> bool {
    let Some(search_path) = &state.search_path else {
        return false;
    };
    std::env::split_paths(search_path)
        .map(|dir| state.resolve_path(&dir).join(executable))
        .any(|candidate| candidate.is_file())
}

fn stage_failed(stage: &CommandStage, failure: ExecFailure) -> StageRun {
    eprintln!("{} {}: {}", "❌".red(), stage.executable, failure);
    StageRun::Finished(failure.status())
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

fn reap(runs: Vec<StageRun>) {
    for run in runs {
        if let StageRun::Running(mut child) = run {
            child.wait().ok();
        }
    }
}
