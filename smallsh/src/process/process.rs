use nix::unistd::execvp;
use std::ffi::CString;
use tracing::debug;

use super::redirect::Redirect;
use super::signal::restore_default_signals;
use smallsh_types::ShellResult;

/// One resolved command line: the program and its arguments, where its
/// stdin/stdout go, and whether it was asked to run in the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub(crate) cmd: String,
    pub argv: Vec<String>,
    pub redirects: Vec<Redirect>,
    pub background: bool,
}

impl Process {
    pub fn new(argv: Vec<String>, redirects: Vec<Redirect>, background: bool) -> Self {
        let cmd = argv.first().cloned().unwrap_or_default();
        Process {
            cmd,
            argv,
            redirects,
            background,
        }
    }

    pub fn get_cmd(&self) -> &str {
        &self.cmd
    }

    pub fn input(&self) -> Option<&str> {
        self.redirects.iter().rev().find_map(|r| match r {
            Redirect::Input(path) => Some(path.as_str()),
            Redirect::Output(_) => None,
        })
    }

    pub fn output(&self) -> Option<&str> {
        self.redirects.iter().rev().find_map(|r| match r {
            Redirect::Output(path) => Some(path.as_str()),
            Redirect::Input(_) => None,
        })
    }

    /// Builds the exec arguments up front so the child does no fallible
    /// conversion work after `fork`.
    pub(crate) fn exec_args(&self) -> ShellResult<Vec<CString>> {
        Ok(self
            .argv
            .iter()
            .map(|a| CString::new(a.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Runs in the forked child and never returns: either the program image
    /// replaces this one or the child exits with status 1.
    pub(crate) fn launch(&self, argv: &[CString]) -> ! {
        if let Err(err) = restore_default_signals() {
            eprintln!("smallsh: failed to reset signal handlers: {err}");
            exit_child(1);
        }

        for redirect in &self.redirects {
            if let Err(err) = redirect.apply() {
                eprintln!("smallsh: {err:#}");
                exit_child(1);
            }
        }

        debug!("launch: execvp cmd:{:?} argv:{:?}", self.cmd, argv);
        match execvp(&argv[0], argv) {
            Ok(_) => exit_child(0),
            Err(nix::errno::Errno::EACCES) => {
                eprintln!("smallsh: {}: permission denied", self.cmd);
                exit_child(1);
            }
            Err(err) => {
                eprintln!("smallsh: {}: {}", self.cmd, err.desc());
                exit_child(1);
            }
        }
    }
}

/// Leaves the forked child without running the parent's atexit handlers or
/// flushing its copied stdio buffers.
fn exit_child(code: i32) -> ! {
    unsafe { libc::_exit(code) }
}
