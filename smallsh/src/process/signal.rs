use libc::c_int;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, kill, sigaction};
use nix::unistd::Pid;
use smallsh_types::{ShellError, ShellResult};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

static RECEIVED_SIGINT: AtomicBool = AtomicBool::new(false);
static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);
static MODE_NOTICE_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigint(_: c_int) {
    RECEIVED_SIGINT.store(true, Ordering::SeqCst);
    // sigaction(2) is async-signal-safe
    let _ = unsafe { sigaction(Signal::SIGINT, &ignore_action()) };
}

extern "C" fn handle_sigtstp(_: c_int) {
    FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    MODE_NOTICE_PENDING.store(true, Ordering::SeqCst);
}

fn ignore_action() -> SigAction {
    SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::all())
}

/// Message the main loop prints after SIGTSTP flipped foreground-only mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ModeNotice {
    Entering,
    Exiting,
}

impl fmt::Display for ModeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeNotice::Entering => f.write_str("\nEntering foreground-only mode (& is now ignored)"),
            ModeNotice::Exiting => f.write_str("\nExiting foreground-only mode"),
        }
    }
}

/// The flag SIGTSTP toggles. The shell session holds on to this reference.
pub fn foreground_only_flag() -> &'static AtomicBool {
    &FOREGROUND_ONLY
}

/// Installs the shell's SIGINT and SIGTSTP handlers.
///
/// No `SA_RESTART`: a blocking read at the prompt comes back with `EINTR` so
/// the loop can print the mode notice right away.
pub fn install_shell_handlers() -> ShellResult<()> {
    debug!("installing SIGINT and SIGTSTP handlers");
    let handlers: [(Signal, extern "C" fn(c_int)); 2] = [
        (Signal::SIGINT, handle_sigint),
        (Signal::SIGTSTP, handle_sigtstp),
    ];
    for (signal, handler) in handlers {
        let action = SigAction::new(SigHandler::Handler(handler), SaFlags::empty(), SigSet::all());
        unsafe { sigaction(signal, &action) }
            .map_err(|source| ShellError::Signal { signal, source })?;
    }
    Ok(())
}

/// Child side: put back default dispositions so the program can be
/// interrupted. SIGPIPE is included because the Rust runtime ignores it and
/// an ignored disposition survives exec.
pub(crate) fn restore_default_signals() -> ShellResult<()> {
    let action = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    for signal in [Signal::SIGINT, Signal::SIGTSTP, Signal::SIGPIPE] {
        unsafe { sigaction(signal, &action) }
            .map_err(|source| ShellError::Signal { signal, source })?;
    }
    Ok(())
}

/// Returns the notice to print if SIGTSTP arrived since the last call.
pub fn take_mode_notice() -> Option<ModeNotice> {
    if MODE_NOTICE_PENDING.swap(false, Ordering::SeqCst) {
        if FOREGROUND_ONLY.load(Ordering::SeqCst) {
            Some(ModeNotice::Entering)
        } else {
            Some(ModeNotice::Exiting)
        }
    } else {
        None
    }
}

pub fn check_and_clear_sigint() -> bool {
    RECEIVED_SIGINT.swap(false, Ordering::SeqCst)
}

pub(crate) fn send_signal(pid: Pid, signal: Signal) -> ShellResult<()> {
    debug!("sending signal {:?} to pid {}", signal, pid);
    kill(pid, signal).map_err(|source| {
        error!("failed to send signal {:?} to pid {}: {}", signal, pid, source);
        ShellError::Kill {
            pid,
            signal,
            source,
        }
    })
}
