pub mod env;
pub mod io;

use crate::shell::context::ShellState;

/// Helper to register all built-in commands at once
pub fn register_all_builtins(state: &mut ShellState) {
    // Env/Navigation
    state.register_command("cd", Box::new(env::cd::CdCommand));
    state.register_command("exit", Box::new(env::exit::ExitCommand));
    state.register_command("rc", Box::new(env::rc::RcCommand));

    // IO
    state.register_command("dragon", Box::new(io::dragon::DragonCommand));
}
