use thiserror::Error;
use tracing::debug;

use crate::process::{Process, Redirect};

pub mod expansion;

pub use expansion::{PID_PLACEHOLDER, expand_pid, expand_words};

/// Maximum number of words accepted on one command line.
pub const MAX_ARGS: usize = 512;

const INPUT_OP: &str = "<";
const OUTPUT_OP: &str = ">";
const BACKGROUND_OP: &str = "&";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error: expected a file name after `{0}`")]
    MissingRedirectTarget(String),

    #[error("syntax error: no command given")]
    EmptyCommand,

    #[error("too many arguments (limit is {MAX_ARGS})")]
    TooManyArguments,
}

/// Splits a line on whitespace. No quoting, no escapes.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if words.len() > MAX_ARGS {
        return Err(ParseError::TooManyArguments);
    }
    Ok(words)
}

/// Turns the words of one line into a launchable [`Process`].
///
/// A final standalone `&` requests background execution; an `&` anywhere else
/// is passed through as an ordinary argument. `<` and `>` consume the word that
/// follows them. None of these operators reach the executed program.
pub fn parse_command(mut words: Vec<String>) -> Result<Process, ParseError> {
    let background = words.last().is_some_and(|w| w == BACKGROUND_OP);
    if background {
        words.pop();
    }

    let mut argv = Vec::with_capacity(words.len());
    let mut redirects = Vec::new();
    let mut iter = words.into_iter();
    while let Some(word) = iter.next() {
        match word.as_str() {
            INPUT_OP => {
                let path = iter
                    .next()
                    .ok_or_else(|| ParseError::MissingRedirectTarget(word.clone()))?;
                redirects.push(Redirect::Input(path));
            }
            OUTPUT_OP => {
                let path = iter
                    .next()
                    .ok_or_else(|| ParseError::MissingRedirectTarget(word.clone()))?;
                redirects.push(Redirect::Output(path));
            }
            _ => argv.push(word),
        }
    }

    if argv.is_empty() {
        return Err(ParseError::EmptyCommand);
    }

    let process = Process::new(argv, redirects, background);
    debug!("parsed command: {:?}", process);
    Ok(process)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        tokenize(line).unwrap()
    }

    #[test]
    fn tokenize_splits_on_any_whitespace() {
        assert_eq!(words("  ls   -la\t/tmp  "), vec!["ls", "-la", "/tmp"]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn tokenize_rejects_too_many_words() {
        let line = vec!["x"; MAX_ARGS + 1].join(" ");
        assert_eq!(tokenize(&line), Err(ParseError::TooManyArguments));
        let line = vec!["x"; MAX_ARGS].join(" ");
        assert_eq!(tokenize(&line).unwrap().len(), MAX_ARGS);
    }

    #[test]
    fn output_redirect_and_background() {
        let process = parse_command(words("echo hi > out.txt &")).unwrap();
        assert_eq!(process.argv, vec!["echo", "hi"]);
        assert_eq!(process.output(), Some("out.txt"));
        assert_eq!(process.input(), None);
        assert!(process.background);
    }

    #[test]
    fn input_and_output_in_either_order() {
        let process = parse_command(words("sort > sorted.txt < in.txt")).unwrap();
        assert_eq!(process.argv, vec!["sort"]);
        assert_eq!(process.input(), Some("in.txt"));
        assert_eq!(process.output(), Some("sorted.txt"));
        assert!(!process.background);

        let process = parse_command(words("wc -l < in.txt > count.txt")).unwrap();
        assert_eq!(process.argv, vec!["wc", "-l"]);
        assert_eq!(process.input(), Some("in.txt"));
        assert_eq!(process.output(), Some("count.txt"));
    }

    #[test]
    fn ampersand_is_only_special_at_the_end() {
        let process = parse_command(words("echo a & b")).unwrap();
        assert_eq!(process.argv, vec!["echo", "a", "&", "b"]);
        assert!(!process.background);

        let process = parse_command(words("echo a&")).unwrap();
        assert_eq!(process.argv, vec!["echo", "a&"]);
        assert!(!process.background);
    }

    #[test]
    fn missing_redirect_target_is_an_error() {
        assert_eq!(
            parse_command(words("cat <")),
            Err(ParseError::MissingRedirectTarget("<".to_string()))
        );
        assert_eq!(
            parse_command(words("ls > &")),
            Err(ParseError::MissingRedirectTarget(">".to_string()))
        );
    }

    #[test]
    fn operators_without_a_program_are_rejected() {
        assert_eq!(parse_command(words("&")), Err(ParseError::EmptyCommand));
        assert_eq!(
            parse_command(words("> out.txt")),
            Err(ParseError::EmptyCommand)
        );
        assert_eq!(parse_command(vec![]), Err(ParseError::EmptyCommand));
    }

    #[test]
    fn last_redirect_of_a_kind_wins() {
        let process = parse_command(words("echo x > a > b")).unwrap();
        assert_eq!(process.output(), Some("b"));
        assert_eq!(process.redirects.len(), 2);
    }
}
