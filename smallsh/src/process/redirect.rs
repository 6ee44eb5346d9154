use anyhow::{Context as _, Result, bail};
use libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::fcntl::{OFlag, open};
use nix::sys::stat::{Mode, SFlag, stat};
use nix::unistd::{close, dup2};
use std::os::unix::io::RawFd;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    Input(String),
    Output(String),
}

impl Redirect {
    /// Wires the redirect onto stdin/stdout. Only ever called in the forked
    /// child, so the descriptors never live in the shell itself.
    pub(crate) fn apply(&self) -> Result<()> {
        match self {
            Redirect::Input(path) => {
                let fd = open(path.as_str(), OFlag::O_RDONLY, Mode::empty())
                    .with_context(|| format!("cannot open {path} for input"))?;
                move_fd(fd, STDIN_FILENO)
            }
            Redirect::Output(path) => {
                if is_directory(path) {
                    bail!("{path}: is a directory");
                }
                let fd = open(
                    path.as_str(),
                    OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
                    Mode::from_bits_truncate(0o644),
                )
                .with_context(|| format!("cannot open {path} for output"))?;
                move_fd(fd, STDOUT_FILENO)
            }
        }
    }
}

fn is_directory(path: &str) -> bool {
    match stat(path) {
        Ok(st) => SFlag::from_bits_truncate(st.st_mode) & SFlag::S_IFMT == SFlag::S_IFDIR,
        Err(_) => false,
    }
}

fn move_fd(src: RawFd, dst: RawFd) -> Result<()> {
    if src != dst {
        dup2(src, dst).context("dup2() failed")?;
        close(src).context("close() failed")?;
    }
    Ok(())
}
