use libc::STDIN_FILENO;
use nix::errno::Errno;
use nix::unistd::read;
use std::io;
use std::os::unix::io::RawFd;
use tracing::debug;

/// Longest line accepted at the prompt, in bytes.
pub const MAX_LINE_LENGTH: usize = 2048;

const READ_CHUNK: usize = 1024;
const COMMENT_PREFIX: char = '#';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A trimmed line, without its newline.
    Line(String),
    /// A signal arrived while waiting for input.
    Interrupted,
    /// The line was longer than [`MAX_LINE_LENGTH`] and was discarded.
    TooLong(usize),
    Eof,
}

/// Reads lines straight from a descriptor with `read(2)`.
///
/// `std::io::Stdin` retries on `EINTR`, which would hide SIGTSTP from the
/// prompt until the next line is typed.
#[derive(Debug)]
pub struct LineReader {
    fd: RawFd,
    buf: Vec<u8>,
    /// Bytes already dropped from an overlong line still being read.
    discarded: usize,
    eof: bool,
}

impl LineReader {
    pub fn new(fd: RawFd) -> Self {
        LineReader {
            fd,
            buf: Vec::with_capacity(READ_CHUNK),
            discarded: 0,
            eof: false,
        }
    }

    pub fn stdin() -> Self {
        Self::new(STDIN_FILENO)
    }

    pub fn read_line(&mut self) -> io::Result<ReadOutcome> {
        loop {
            if let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
                let raw: Vec<u8> = self.buf.drain(..=pos).collect();
                return Ok(self.finish(&raw[..pos]));
            }
            if self.eof {
                if self.buf.is_empty() && self.discarded == 0 {
                    return Ok(ReadOutcome::Eof);
                }
                let raw = std::mem::take(&mut self.buf);
                return Ok(self.finish(&raw));
            }
            if self.buf.len() > MAX_LINE_LENGTH {
                self.discarded += self.buf.len();
                self.buf.clear();
            }

            let mut chunk = [0u8; READ_CHUNK];
            match read(self.fd, &mut chunk) {
                Ok(0) => {
                    debug!("input: end of file on fd {}", self.fd);
                    self.eof = true;
                }
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(Errno::EINTR) => return Ok(ReadOutcome::Interrupted),
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn finish(&mut self, raw: &[u8]) -> ReadOutcome {
        let len = std::mem::take(&mut self.discarded) + raw.len();
        if len > MAX_LINE_LENGTH {
            return ReadOutcome::TooLong(len);
        }
        ReadOutcome::Line(String::from_utf8_lossy(raw).trim().to_string())
    }
}

/// Blank lines and `#` comments never reach the evaluator.
pub fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with(COMMENT_PREFIX)
}
