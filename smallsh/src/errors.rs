use crate::shell::APP_NAME;
use smallsh_types::ShellError;
use tracing::error;

/// Display error in a user-friendly format without stack traces.
pub fn display_user_error(err: &anyhow::Error) {
    error!("{:#}", err);
    match err.downcast_ref::<ShellError>() {
        Some(ShellError::Fork(errno)) => eprintln!("{APP_NAME}: fork() failed: {}", errno.desc()),
        _ => eprintln!("{APP_NAME}: {err:#}"),
    }
}
