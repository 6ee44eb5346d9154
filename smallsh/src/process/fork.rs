use nix::unistd::{ForkResult, Pid, fork};
use std::io::Write;
use tracing::debug;

use super::process::Process;
use smallsh_types::{ShellError, ShellResult};

/// Forks and execs `process`, returning the child's pid to the parent.
///
/// The parent never waits here.
pub fn fork_process(process: &Process) -> ShellResult<Pid> {
    let argv = process.exec_args()?;

    // anything still buffered would otherwise be written twice
    std::io::stdout().flush()?;
    std::io::stderr().flush()?;

    debug!("FORK: about to fork for {}", process.get_cmd());
    match unsafe { fork() }.map_err(ShellError::Fork)? {
        ForkResult::Parent { child } => {
            debug!("FORK: parent - child pid: {}", child);
            Ok(child)
        }
        ForkResult::Child => process.launch(&argv),
    }
}
