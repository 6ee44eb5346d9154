use super::ShellProxy;
use smallsh_types::{Context, ExitOutcome};
use tracing::debug;

/// `cd [dir]`. Without an argument the target is the user's home directory.
/// The target has already been through `$$` expansion by the time it gets here.
pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitOutcome {
    let dir = match argv.get(1) {
        Some(dir) => dir.clone(),
        None => match dirs::home_dir() {
            Some(home_dir) => home_dir.to_string_lossy().into_owned(),
            None => {
                ctx.write_stderr("cd: HOME not set").ok();
                return ExitOutcome::Exited(1);
            }
        },
    };
    debug!("cd target: {}", dir);

    if let Err(err) = proxy.changepwd(&dir) {
        ctx.write_stderr(&format!("cd: {dir}: {err}")).ok();
        return ExitOutcome::Exited(1);
    }

    match std::env::current_dir() {
        Ok(cwd) => {
            ctx.write_stdout(&format!("Current directory: {}", cwd.display()))
                .ok();
            ExitOutcome::Exited(0)
        }
        Err(err) => {
            ctx.write_stderr(&format!("cd: getcwd() failed: {err}")).ok();
            ExitOutcome::Exited(1)
        }
    }
}
