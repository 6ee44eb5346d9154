pub mod eval;
pub mod job;

use crate::process::signal::{self, foreground_only_flag, take_mode_notice};
use nix::unistd::{Pid, getpid};
use smallsh_types::ExitOutcome;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

pub const APP_NAME: &str = "smallsh";

/// Session state for one running shell.
///
/// `foreground_only` is shared with the SIGTSTP handler, so it is the only
/// field that can change outside the main loop.
pub struct Shell {
    pub pid: Pid,
    pub foreground_only: &'static AtomicBool,
    pub last_status: ExitOutcome,
    pub background_pid: Option<Pid>,
    pub exited: bool,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("pid", &self.pid)
            .field("foreground_only", &self.is_foreground_only())
            .field("last_status", &self.last_status)
            .field("background_pid", &self.background_pid)
            .finish()
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.terminate_background_job();
    }
}

impl Shell {
    pub fn new() -> Self {
        Shell {
            pid: getpid(),
            foreground_only: foreground_only_flag(),
            last_status: ExitOutcome::default(),
            background_pid: None,
            exited: false,
        }
    }

    pub fn set_signals(&mut self) {
        if let Err(e) = signal::install_shell_handlers() {
            warn!("Failed to install signal handlers: {}", e);
        }
        debug!("Signal handlers setup completed");
    }

    pub fn is_foreground_only(&self) -> bool {
        self.foreground_only.load(Ordering::SeqCst)
    }

    pub fn print_error(&self, msg: String) {
        eprintln!("{APP_NAME}: {msg}");
        std::io::stderr().flush().ok();
    }

    /// Prints the SIGTSTP notice if the mode changed since the last check.
    pub fn print_mode_notice(&self) {
        if let Some(notice) = take_mode_notice() {
            debug!("foreground-only mode notice: {:?}", notice);
            println!("{notice}");
            std::io::stdout().flush().ok();
        }
    }

    pub fn reap_background_jobs(&mut self) {
        job::reap_background_jobs(self)
    }

    pub fn terminate_background_job(&mut self) {
        job::terminate_background_job(self)
    }

    pub fn exit(&mut self) {
        self.exited = true;
    }

    /// Kills the outstanding background process, if any. Exiting the process
    /// is left to the caller.
    pub fn shutdown(&mut self) {
        debug!("shutting down shell {}", self.pid);
        self.terminate_background_job();
    }
}
