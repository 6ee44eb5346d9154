use crate::input::{LineReader, MAX_LINE_LENGTH, ReadOutcome, is_skippable};
use crate::process::signal::check_and_clear_sigint;
use crate::shell::{Shell, eval};
use anyhow::{Context as _, Result};
use smallsh_types::Context;
use std::io::Write;
use tracing::debug;

pub struct Repl<'a> {
    pub shell: &'a mut Shell,
    ctx: Context,
    reader: LineReader,
    prompt: String,
}

impl<'a> Repl<'a> {
    pub fn new(shell: &'a mut Shell, prompt: String) -> Self {
        let ctx = Context::new(shell.pid);
        Repl {
            shell,
            ctx,
            reader: LineReader::stdin(),
            prompt,
        }
    }

    fn print_prompt(&self) -> Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(self.prompt.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Runs until `exit` or end of input. Returns an error only when the
    /// shell cannot continue (a failed fork or an unreadable stdin).
    pub fn run(&mut self) -> Result<()> {
        debug!("start repl, interactive: {}", self.ctx.interactive);
        while !self.shell.exited {
            self.shell.reap_background_jobs();
            self.shell.print_mode_notice();
            self.print_prompt()?;

            let line = match self.reader.read_line().context("failed to read input")? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => {
                    if check_and_clear_sigint() {
                        println!();
                    }
                    continue;
                }
                ReadOutcome::TooLong(len) => {
                    self.shell.print_error(format!(
                        "line too long ({len} bytes, limit is {MAX_LINE_LENGTH})"
                    ));
                    continue;
                }
                ReadOutcome::Eof => {
                    debug!("end of input");
                    break;
                }
            };
            if is_skippable(&line) {
                continue;
            }
            eval::eval_str(self.shell, &self.ctx, &line)?;
        }
        self.shell.shutdown();
        Ok(())
    }
}
