use crate::parser::{self, expand_words};
use crate::shell::{Shell, job};
use smallsh_builtin::get_command;
use smallsh_types::{Context, ShellResult};
use tracing::debug;

/// Evaluates one input line.
///
/// Words are `$$`-expanded first, then either handed to a builtin or resolved
/// into a [`crate::process::Process`] and launched. Only a fatal launch error
/// (fork failure) is returned; everything else is reported and swallowed so
/// the loop can continue.
pub fn eval_str(shell: &mut Shell, ctx: &Context, input: &str) -> ShellResult<()> {
    let mut words = match parser::tokenize(input) {
        Ok(words) => words,
        Err(err) => {
            shell.print_error(err.to_string());
            return Ok(());
        }
    };
    if words.is_empty() {
        return Ok(());
    }
    expand_words(&mut words, shell.pid);

    if let Some(builtin) = get_command(&words[0]) {
        debug!("builtin: {:?}", words);
        let outcome = builtin(ctx, words, shell);
        debug!("builtin finished: {}", outcome);
        return Ok(());
    }

    let process = match parser::parse_command(words) {
        Ok(process) => process,
        Err(err) => {
            shell.print_error(err.to_string());
            return Ok(());
        }
    };
    job::launch(shell, process)
}
