use anyhow::Result;
use libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::{isatty, Pid};
use std::fmt::Debug;
use std::fs::File;
use std::io::Write;
use std::mem;
use std::os::unix::io::FromRawFd;
use std::os::unix::io::RawFd;
use thiserror::Error;

pub mod outcome;
pub use outcome::ExitOutcome;

/// smallsh specific error types
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("fork failed: {0}")]
    Fork(nix::Error),

    #[error("waitpid failed for pid {pid}: {source}")]
    Wait { pid: Pid, source: nix::Error },

    #[error("failed to install handler for {signal}: {source}")]
    Signal {
        signal: nix::sys::signal::Signal,
        source: nix::Error,
    },

    #[error("failed to send {signal} to pid {pid}: {source}")]
    Kill {
        pid: Pid,
        signal: nix::sys::signal::Signal,
        source: nix::Error,
    },

    #[error("argument contains an interior NUL byte: {0}")]
    Nul(#[from] std::ffi::NulError),
}

pub type ShellResult<T> = std::result::Result<T, ShellError>;

/// File descriptors and identity that builtins need to do their I/O.
#[derive(Clone)]
pub struct Context {
    pub shell_pid: Pid,
    pub interactive: bool,
    pub outfile: RawFd,
    pub errfile: RawFd,
}

impl Context {
    pub fn new(shell_pid: Pid) -> Self {
        Context {
            shell_pid,
            interactive: isatty(STDIN_FILENO).unwrap_or(false),
            outfile: STDOUT_FILENO,
            errfile: STDERR_FILENO,
        }
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("Context")
            .field("shell_pid", &self.shell_pid)
            .field("interactive", &self.interactive)
            .field("outfile", &self.outfile)
            .field("errfile", &self.errfile)
            .finish()
    }
}

impl Context {
    pub fn write_stdout(&self, msg: &str) -> Result<()> {
        let mut file = unsafe { File::from_raw_fd(self.outfile) };
        let res = writeln!(&mut file, "{msg}").and_then(|_| file.flush());
        mem::forget(file);
        res?;
        Ok(())
    }

    pub fn write_stderr(&self, msg: &str) -> Result<()> {
        let mut file = unsafe { File::from_raw_fd(self.errfile) };
        let res = writeln!(&mut file, "{msg}");
        mem::forget(file);
        res?;
        Ok(())
    }
}
