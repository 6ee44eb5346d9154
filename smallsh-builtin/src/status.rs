use super::ShellProxy;
use smallsh_types::{Context, ExitOutcome};

/// Prints how the last foreground command finished. Leaves that outcome untouched.
pub fn command(ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitOutcome {
    let last = proxy.last_status();
    if let Err(err) = ctx.write_stdout(&last.to_string()) {
        ctx.write_stderr(&format!("status: {err}")).ok();
        return ExitOutcome::Exited(1);
    }
    ExitOutcome::Exited(0)
}
