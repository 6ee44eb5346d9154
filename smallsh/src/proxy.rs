use crate::shell::Shell;
use anyhow::Result;
use smallsh_builtin::ShellProxy;
use smallsh_types::ExitOutcome;
use tracing::debug;

impl ShellProxy for Shell {
    fn exit_shell(&mut self) {
        debug!("exit requested");
        self.exit();
    }

    fn changepwd(&mut self, path: &str) -> Result<()> {
        std::env::set_current_dir(path)?;
        debug!("changed directory to {}", path);
        Ok(())
    }

    fn last_status(&self) -> ExitOutcome {
        self.last_status
    }
}
