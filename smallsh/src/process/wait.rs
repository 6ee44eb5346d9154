use nix::errno::Errno;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use smallsh_types::{ExitOutcome, ShellError, ShellResult};
use tracing::{debug, error};

/// Blocks until `pid` terminates. Signals delivered to the shell meanwhile
/// (`EINTR`) do not end the wait.
pub fn wait_foreground(pid: Pid) -> ShellResult<ExitOutcome> {
    debug!("WAIT_FG_START: waiting for pid {}", pid);
    loop {
        match waitpid(pid, None) {
            Ok(status) => match ExitOutcome::try_from(status) {
                Ok(outcome) => {
                    debug!("WAIT_FG_DONE: pid {} finished: {}", pid, outcome);
                    return Ok(outcome);
                }
                Err(other) => {
                    debug!("WAIT_FG_SKIP: non-terminal status {:?}", other);
                }
            },
            Err(Errno::EINTR) => {
                debug!("WAIT_FG_EINTR: interrupted, waiting again for pid {}", pid);
            }
            Err(source) => return Err(ShellError::Wait { pid, source }),
        }
    }
}

/// Collects every child that has already terminated without blocking.
pub fn reap_finished() -> Vec<(Pid, ExitOutcome)> {
    let mut finished = Vec::new();
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => break,
            Ok(status) => {
                if let (Some(pid), Ok(outcome)) = (status.pid(), ExitOutcome::try_from(status)) {
                    debug!("REAP: pid {} finished: {}", pid, outcome);
                    finished.push((pid, outcome));
                }
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => break,
            Err(err) => {
                error!("REAP: waitpid failed: {}", err);
                break;
            }
        }
    }
    finished
}
