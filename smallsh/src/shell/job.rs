use crate::process::{Process, fork_process, reap_finished, signal::send_signal, wait_foreground};
use crate::shell::Shell;
use nix::sys::signal::Signal;
use nix::unistd::Pid;
use smallsh_types::{ShellError, ShellResult};
use std::io::Write;
use tracing::{debug, error, warn};

/// Forks `process` and applies the wait policy.
///
/// Only a failed `fork` comes back as an error; it means the shell cannot go
/// on. Everything else is reported here and the loop continues.
pub fn launch(shell: &mut Shell, process: Process) -> ShellResult<()> {
    let pid = match fork_process(&process) {
        Ok(pid) => pid,
        Err(err @ ShellError::Fork(_)) => return Err(err),
        Err(err) => {
            shell.print_error(format!("{}: {}", process.get_cmd(), err));
            return Ok(());
        }
    };
    dispatch(shell, pid, process.background);
    Ok(())
}

/// Decides between recording a background job and waiting in the foreground.
pub fn dispatch(shell: &mut Shell, pid: Pid, background: bool) {
    if background && !shell.is_foreground_only() {
        println!("background pid is {pid}");
        std::io::stdout().flush().ok();
        if let Some(previous) = shell.background_pid.replace(pid) {
            debug!("background pid {} is no longer tracked", previous);
        }
        return;
    }

    if background {
        debug!("foreground-only mode: running pid {} in the foreground", pid);
    }
    shell.background_pid = None;
    match wait_foreground(pid) {
        Ok(outcome) => {
            debug!("foreground pid {} finished: {}", pid, outcome);
            shell.last_status = outcome;
        }
        Err(err) => {
            error!("{}", err);
            shell.print_error(err.to_string());
        }
    }
    shell.print_mode_notice();
}

/// Reports every child that finished since the last prompt.
pub fn reap_background_jobs(shell: &mut Shell) {
    for (pid, outcome) in reap_finished() {
        println!("background pid {pid} is done: {outcome}");
        if shell.background_pid == Some(pid) {
            shell.background_pid = None;
        }
    }
    std::io::stdout().flush().ok();
}

/// SIGKILLs the tracked background process.
pub fn terminate_background_job(shell: &mut Shell) {
    if let Some(pid) = shell.background_pid.take() {
        debug!("Terminating background job (pid: {})", pid);
        if let Err(e) = send_signal(pid, Signal::SIGKILL) {
            warn!("Failed to terminate background job {}: {}", pid, e);
        }
    }
}
