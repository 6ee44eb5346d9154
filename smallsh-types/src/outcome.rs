use nix::sys::wait::WaitStatus;
use std::fmt;

/// How a foreground or background child finished.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitOutcome {
    Exited(u8),
    Signaled(u32),
}

impl Default for ExitOutcome {
    fn default() -> Self {
        ExitOutcome::Exited(0)
    }
}

/// Only terminal statuses convert; stopped, continued and still-alive
/// statuses are handed back unchanged.
impl TryFrom<WaitStatus> for ExitOutcome {
    type Error = WaitStatus;

    fn try_from(status: WaitStatus) -> Result<Self, Self::Error> {
        match status {
            WaitStatus::Exited(_, code) => Ok(ExitOutcome::Exited(code as u8)),
            WaitStatus::Signaled(_, signal, _) => Ok(ExitOutcome::Signaled(signal as i32 as u32)),
            other => Err(other),
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Exited(code) => write!(f, "exit value {code}"),
            ExitOutcome::Signaled(signal) => write!(f, "terminated by signal {signal}"),
        }
    }
}
