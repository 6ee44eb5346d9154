use anyhow::Result;
use once_cell::sync::Lazy;
use smallsh_types::{Context, ExitOutcome};
use std::collections::HashMap;
use tracing::debug;

// Builtin command modules
pub mod cd;
mod status;

/// Trait that provides an interface for builtin commands to interact with the shell
/// This allows builtin commands to perform shell operations without direct coupling
pub trait ShellProxy {
    /// Initiates shell exit process
    fn exit_shell(&mut self);

    /// Changes the current working directory
    fn changepwd(&mut self, path: &str) -> Result<()>;

    /// Outcome of the most recent foreground command
    fn last_status(&self) -> ExitOutcome;
}

/// Type alias for builtin command function signature
/// All builtin commands must conform to this signature
pub type BuiltinCommand =
    fn(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitOutcome;

/// Registry of all builtin commands
pub static BUILTIN_COMMAND: Lazy<HashMap<&str, BuiltinCommand>> = Lazy::new(|| {
    let mut builtin = HashMap::new();
    builtin.insert("exit", exit as BuiltinCommand);
    builtin.insert("cd", cd::command as BuiltinCommand);
    builtin.insert("status", status::command as BuiltinCommand);
    builtin
});

/// Retrieves a builtin command function by name
/// Returns None if the command is not found
pub fn get_command(name: &str) -> Option<BuiltinCommand> {
    BUILTIN_COMMAND.get(name).copied()
}

/// Built-in exit command implementation
pub fn exit(_ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitOutcome {
    debug!("Exit command called - initiating normal shell exit");
    proxy.exit_shell();
    ExitOutcome::Exited(0)
}
