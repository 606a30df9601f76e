use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::shell::commands::Builtin;

/// Cross-command state of one shell session.
///
/// `last_exit_code` is written only by the executor once an external pipeline
/// has been reaped, and read by the `rc` builtin.
pub struct ShellState {
    pub last_exit_code: i32,
    pub cwd: PathBuf,
    pub home: Option<PathBuf>,
    /// Directories searched for programs, in `PATH` syntax.
    pub search_path: Option<OsString>,
    pub registry: Arc<HashMap<String, Box<dyn Builtin>>>,
    // When set, `cd` also moves the real process working directory.
    follows_process_cwd: bool,
}

impl ShellState {
    /// State for the interactive shell: starts in, and drives, the process cwd.
    pub fn new() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::build(cwd, home, true)
    }

    /// State whose working directory is tracked logically only. Children are
    /// spawned in `cwd`, but the host process never changes directory.
    pub fn isolated(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self::build(cwd.into(), home, false)
    }

    fn build(cwd: PathBuf, home: Option<PathBuf>, follows_process_cwd: bool) -> Self {
        let mut state = Self {
            last_exit_code: 0,
            cwd,
            home,
            search_path: std::env::var_os("PATH"),
            registry: Arc::new(HashMap::new()),
            follows_process_cwd,
        };
        crate::shell::commands::builtins::register_all_builtins(&mut state);
        state
    }

    pub fn register_command(&mut self, name: &str, command: Box<dyn Builtin>) {
        if let Some(map) = Arc::get_mut(&mut self.registry) {
            map.insert(name.to_string(), command);
        } else {
            // Only reachable if a clone of the registry is alive during setup.
            log::warn!("Cannot register builtin '{}': registry is shared", name);
        }
    }

    pub fn record_exit(&mut self, code: i32) {
        log::debug!("Recording exit status {}", code);
        self.last_exit_code = code;
    }

    /// Relative paths resolve against the shell's working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    pub fn change_dir(&mut self, target: &Path) -> io::Result<()> {
        let new_path = self.resolve_path(target);
        if !new_path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", target.display()),
            ));
        }
        // Canonicalize to remove .. and .
        let new_path = new_path.canonicalize()?;
        if self.follows_process_cwd {
            std::env::set_current_dir(&new_path)?;
        }
        self.cwd = new_path;
        Ok(())
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}
